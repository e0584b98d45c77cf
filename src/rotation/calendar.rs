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

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime};

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midday of the given date.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The instant a run started, decomposed into the calendar fields the
/// trigger rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today {
    now: NaiveDateTime,
}

impl Today {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.now())
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn date(&self) -> NaiveDate {
        self.now.date()
    }

    /// 1 = Monday .. 7 = Sunday
    pub fn day_of_week(&self) -> u32 {
        self.now.weekday().number_from_monday()
    }

    /// 1 .. 31
    pub fn day_of_month(&self) -> u32 {
        self.now.day()
    }

    /// Zero-based: the 1st of January is day 0.
    pub fn day_of_year(&self) -> u32 {
        self.now.ordinal0()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

/// The date `count` periods before `date`.
///
/// Months and years are calendar steps, not fixed day counts. When the
/// target month is shorter, the result is clamped to its last day, so
/// 31 March minus one month is the last day of February and 29 February
/// minus one year is 28 February.
pub fn periods_ago(date: NaiveDate, period: Period, count: u32) -> Option<NaiveDate> {
    match period {
        Period::Week => date.checked_sub_days(Days::new(7 * u64::from(count))),
        Period::Month => date.checked_sub_months(Months::new(count)),
        Period::Year => date.checked_sub_months(Months::new(count.checked_mul(12)?)),
    }
}
