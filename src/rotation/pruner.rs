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

use anyhow::Error;
use chrono::NaiveDate;

use crate::{
    config::{PeriodicTier, Retention, Schedule},
    global::{Tier, defaults::DAILY_RETENTION_WEEKS},
};

use super::{
    calendar::{Period, periods_ago},
    naming,
    store::TierStore,
};

/// Outcome of a pruning pass.
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Deleted backups
    pub removed: Vec<(Tier, String)>,
    /// Expired names that were not present
    pub missing: Vec<(Tier, String)>,
    pub failed: Vec<(Tier, String, Error)>,
}

impl PruneReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Period and retention that apply to a tier, or `None` if it is never pruned.
fn retention_of(tier: Tier, schedule: &Schedule) -> Option<(Period, u32)> {
    let keep = |t: &Option<PeriodicTier>, period: Period| match t {
        Some(PeriodicTier {
            retention: Retention::Keep(n),
            ..
        }) => Some((period, *n)),
        _ => None,
    };

    match tier {
        Tier::Manual => None,
        Tier::Daily => Some((Period::Week, DAILY_RETENTION_WEEKS)),
        Tier::Weekly => keep(&schedule.weekly, Period::Week),
        Tier::Monthly => keep(&schedule.monthly, Period::Month),
        Tier::Yearly => keep(&schedule.yearly, Period::Year),
    }
}

/// The date whose backup expires today in `tier`, if the tier is pruned.
pub fn expiry_date(tier: Tier, schedule: &Schedule, today: NaiveDate) -> Option<NaiveDate> {
    let (period, count) = retention_of(tier, schedule)?;
    periods_ago(today, period, count)
}

/// Removes the backups that fall out of every tier's retention window.
///
/// For each pruned tier the backup named for the expiry date is deleted. The
/// daily tier also drops anything older than its window. Failures are
/// collected and do not stop the pass.
pub fn prune(store: &TierStore, schedule: &Schedule, name: &str, today: NaiveDate) -> PruneReport {
    let mut report = PruneReport::default();

    for tier in Tier::SCHEDULED {
        let Some(expiry) = expiry_date(tier, schedule, today) else {
            continue;
        };

        let expired_name = naming::scheduled_name(expiry, name);
        match store.remove(tier, &expired_name) {
            Ok(true) => report.removed.push((tier, expired_name)),
            Ok(false) => report.missing.push((tier, expired_name)),
            Err(e) => report.failed.push((tier, expired_name, e)),
        }

        if tier == Tier::Daily {
            sweep_older_than(store, tier, name, expiry, &mut report);
        }
    }

    report
}

/// Removes every backup of `name` in `tier` dated before `cutoff`.
fn sweep_older_than(
    store: &TierStore,
    tier: Tier,
    name: &str,
    cutoff: NaiveDate,
    report: &mut PruneReport,
) {
    let file_names = match store.list(tier) {
        Ok(file_names) => file_names,
        Err(e) => {
            report.failed.push((tier, String::new(), e));
            return;
        }
    };

    for file_name in file_names {
        match naming::parse_scheduled_date(&file_name, name) {
            Some(date) if date < cutoff => match store.remove(tier, &file_name) {
                Ok(true) => report.removed.push((tier, file_name)),
                Ok(false) => {}
                Err(e) => report.failed.push((tier, file_name, e)),
            },
            _ => {}
        }
    }
}
