// tierback is a tiered backup rotation tool
// Copyright (C) 2025  Javier Lancha Vázquez <javier.lancha@gmail.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use crate::{error::RunError, global::defaults};

/// How many tier-periods of backups a tier keeps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Retention {
    /// Never prune
    Unbounded,

    /// Keep N periods. Always greater than zero.
    Keep(u32),
}

impl Retention {
    /// A count of zero is the "unbounded" sentinel.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Retention::Unbounded,
            n => Retention::Keep(n),
        }
    }
}

/// Trigger and retention of an optional tier (weekly, monthly or yearly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTier {
    pub trigger_day: u32,
    pub retention: Retention,
}

/// When each tier fires. A `None` tier is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Weekdays, 1 = Monday .. 7 = Sunday
    pub daily_days: BTreeSet<u32>,
    /// Trigger day is a weekday, 1 = Monday .. 7 = Sunday
    pub weekly: Option<PeriodicTier>,
    /// Trigger day is a day of the month
    pub monthly: Option<PeriodicTier>,
    /// Trigger day is a zero-based day of the year
    pub yearly: Option<PeriodicTier>,
}

/// Validated configuration. Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Label embedded in every backup file name
    pub name: String,
    pub source_directory: PathBuf,
    pub destination_root: PathBuf,
    pub schedule: Schedule,
}

impl Config {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RunError::config(format!("Cannot read '{}': {}", path.display(), e)))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid configuration file '{}'", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)
            .map_err(|e| RunError::config(format!("Malformed configuration: {e}")))?;
        Ok(file.validate()?)
    }
}

/// On-disk configuration, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source_directory: Option<PathBuf>,
    #[serde(default)]
    pub destination_root: Option<PathBuf>,

    #[serde(default = "default_daily_days")]
    pub daily_days: Vec<u32>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub weekly_enabled: bool,
    #[serde(default = "default_weekly_trigger_day")]
    pub weekly_trigger_day: u32,
    #[serde(default = "default_weekly_retention")]
    pub weekly_retention_weeks: u32,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub monthly_enabled: bool,
    #[serde(default = "default_monthly_trigger_day")]
    pub monthly_trigger_day: u32,
    #[serde(default = "default_monthly_retention")]
    pub monthly_retention_months: u32,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub yearly_enabled: bool,
    #[serde(default = "default_yearly_trigger_day")]
    pub yearly_trigger_day_of_year: u32,
    #[serde(default = "default_yearly_retention")]
    pub yearly_retention_years: u32,
}

fn default_daily_days() -> Vec<u32> {
    defaults::DEFAULT_DAILY_DAYS.to_vec()
}

fn default_weekly_trigger_day() -> u32 {
    defaults::DEFAULT_WEEKLY_TRIGGER_DAY
}

fn default_weekly_retention() -> u32 {
    defaults::DEFAULT_WEEKLY_RETENTION
}

fn default_monthly_trigger_day() -> u32 {
    defaults::DEFAULT_MONTHLY_TRIGGER_DAY
}

fn default_monthly_retention() -> u32 {
    defaults::DEFAULT_MONTHLY_RETENTION
}

fn default_yearly_trigger_day() -> u32 {
    defaults::DEFAULT_YEARLY_TRIGGER_DAY
}

fn default_yearly_retention() -> u32 {
    defaults::DEFAULT_YEARLY_RETENTION
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Int(u64),
}

/// Accepts `true`/`false` as well as `1`/`0`.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(b) => Ok(b),
        FlagValue::Int(0) => Ok(false),
        FlagValue::Int(1) => Ok(true),
        FlagValue::Int(n) => Err(serde::de::Error::custom(format!(
            "invalid flag value {n}, expected 0 or 1"
        ))),
    }
}

fn required_str(value: Option<&str>, key: &str) -> std::result::Result<String, RunError> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(RunError::config(format!("'{key}' is required"))),
    }
}

fn required_path(value: Option<&PathBuf>, key: &str) -> std::result::Result<PathBuf, RunError> {
    match value {
        Some(p) if !p.as_os_str().is_empty() => Ok(p.clone()),
        _ => Err(RunError::config(format!("'{key}' is required"))),
    }
}

fn check_range(
    value: u32,
    range: std::ops::RangeInclusive<u32>,
    key: &str,
) -> std::result::Result<u32, RunError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(RunError::config(format!(
            "'{key}' must be between {} and {}, found {value}",
            range.start(),
            range.end()
        )))
    }
}

impl ConfigFile {
    pub fn validate(&self) -> std::result::Result<Config, RunError> {
        let name = required_str(self.name.as_deref(), "name")?;
        if name.contains('/') || name.contains('\\') {
            return Err(RunError::config(format!(
                "'name' cannot contain a path separator: '{name}'"
            )));
        }

        let source_directory = required_path(self.source_directory.as_ref(), "sourceDirectory")?;
        let destination_root = required_path(self.destination_root.as_ref(), "destinationRoot")?;

        if self.daily_days.is_empty() {
            return Err(RunError::config("'dailyDays' needs at least one weekday"));
        }
        let daily_days = self
            .daily_days
            .iter()
            .map(|&d| check_range(d, 1..=7, "dailyDays"))
            .collect::<std::result::Result<BTreeSet<u32>, RunError>>()?;

        let weekly = match self.weekly_enabled {
            true => Some(PeriodicTier {
                trigger_day: check_range(self.weekly_trigger_day, 1..=7, "weeklyTriggerDay")?,
                retention: Retention::from_count(self.weekly_retention_weeks),
            }),
            false => None,
        };

        let monthly = match self.monthly_enabled {
            true => Some(PeriodicTier {
                trigger_day: check_range(self.monthly_trigger_day, 1..=31, "monthlyTriggerDay")?,
                retention: Retention::from_count(self.monthly_retention_months),
            }),
            false => None,
        };

        let yearly = match self.yearly_enabled {
            true => Some(PeriodicTier {
                trigger_day: check_range(
                    self.yearly_trigger_day_of_year,
                    0..=365,
                    "yearlyTriggerDayOfYear",
                )?,
                retention: Retention::from_count(self.yearly_retention_years),
            }),
            false => None,
        };

        Ok(Config {
            name,
            source_directory,
            destination_root,
            schedule: Schedule {
                daily_days,
                weekly,
                monthly,
                yearly,
            },
        })
    }
}
