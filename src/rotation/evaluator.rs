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

use std::collections::BTreeMap;

use anyhow::Result;

use crate::{
    config::{PeriodicTier, Schedule},
    global::Tier,
};

use super::{calendar::Today, naming};

/// What the invocation asked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Let the calendar decide
    Scheduled,
    /// Take a manual backup and nothing else
    Manual,
}

/// Why a tier is or is not due today.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Due,
    /// The tier is switched off in the configuration
    Disabled,
    /// Today does not match the trigger rule
    NotToday,
    /// A backup named for today is already in the tier
    AlreadyPresent,
    /// Not requested, or skipped because this is a manual run
    Skipped,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Due => write!(f, "due"),
            Verdict::Disabled => write!(f, "disabled"),
            Verdict::NotToday => write!(f, "not today"),
            Verdict::AlreadyPresent => write!(f, "already present"),
            Verdict::Skipped => write!(f, "skipped"),
        }
    }
}

/// The outcome of evaluating every tier for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDecision {
    action: Action,
    verdicts: BTreeMap<Tier, Verdict>,
}

impl RunDecision {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_manual(&self) -> bool {
        self.action == Action::Manual
    }

    pub fn verdict(&self, tier: Tier) -> Verdict {
        self.verdicts.get(&tier).copied().unwrap_or(Verdict::Skipped)
    }

    pub fn is_due(&self, tier: Tier) -> bool {
        self.verdict(tier) == Verdict::Due
    }

    /// Whether an archive has to be produced at all.
    pub fn any_due(&self) -> bool {
        self.verdicts.values().any(|v| *v == Verdict::Due)
    }

    /// Due tiers, in evaluation order.
    pub fn due_tiers(&self) -> Vec<Tier> {
        Tier::ALL
            .into_iter()
            .filter(|tier| self.is_due(*tier))
            .collect()
    }

    pub fn verdicts(&self) -> impl Iterator<Item = (Tier, Verdict)> + '_ {
        self.verdicts.iter().map(|(t, v)| (*t, *v))
    }
}

/// Decides which tiers fire today.
///
/// `exists(tier, file_name)` answers whether a backup is already present. It
/// is only consulted for scheduled tiers whose trigger rule matches today.
pub fn evaluate<F>(
    today: &Today,
    action: Action,
    schedule: &Schedule,
    name: &str,
    mut exists: F,
) -> Result<RunDecision>
where
    F: FnMut(Tier, &str) -> Result<bool>,
{
    let mut verdicts = BTreeMap::new();

    if action == Action::Manual {
        verdicts.insert(Tier::Manual, Verdict::Due);
        for tier in Tier::SCHEDULED {
            verdicts.insert(tier, Verdict::Skipped);
        }
        return Ok(RunDecision { action, verdicts });
    }

    verdicts.insert(Tier::Manual, Verdict::Skipped);

    let todays_name = naming::scheduled_name(today.date(), name);
    for tier in Tier::SCHEDULED {
        let verdict = match trigger_matches(tier, today, schedule) {
            None => Verdict::Disabled,
            Some(false) => Verdict::NotToday,
            Some(true) => match exists(tier, &todays_name)? {
                true => Verdict::AlreadyPresent,
                false => Verdict::Due,
            },
        };
        verdicts.insert(tier, verdict);
    }

    Ok(RunDecision { action, verdicts })
}

/// Evaluates the trigger rule of a scheduled tier. `None` if the tier is disabled.
fn trigger_matches(tier: Tier, today: &Today, schedule: &Schedule) -> Option<bool> {
    let periodic = |t: &Option<PeriodicTier>, field: u32| t.as_ref().map(|p| p.trigger_day == field);

    match tier {
        Tier::Manual => None,
        Tier::Daily => Some(schedule.daily_days.contains(&today.day_of_week())),
        Tier::Weekly => periodic(&schedule.weekly, today.day_of_week()),
        Tier::Monthly => periodic(&schedule.monthly, today.day_of_month()),
        Tier::Yearly => periodic(&schedule.yearly, today.day_of_year()),
    }
}
