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

//! File names are the only record of when a backup was taken.
//!
//! Scheduled tiers use `<YYYYMMDD>-<name>.tar.gz`, so two backups of the same
//! day in the same tier collapse into one file. The manual tier uses minute
//! resolution, `<YYYYMMDDHHmm>-<name>.tar.gz`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::global::defaults::ARCHIVE_EXTENSION;

const DATE_FORMAT: &str = "%Y%m%d";
const MINUTE_FORMAT: &str = "%Y%m%d%H%M";

/// Name of a scheduled backup taken on `date`.
pub fn scheduled_name(date: NaiveDate, name: &str) -> String {
    format!("{}-{}.{}", date.format(DATE_FORMAT), name, ARCHIVE_EXTENSION)
}

/// Name of a manual backup taken at `at`.
pub fn manual_name(at: NaiveDateTime, name: &str) -> String {
    format!("{}-{}.{}", at.format(MINUTE_FORMAT), name, ARCHIVE_EXTENSION)
}

/// Name of the artifact while it waits at the destination root to be
/// copied into the tiers.
pub fn staging_name(name: &str) -> String {
    format!("{}.{}", name, ARCHIVE_EXTENSION)
}

/// Returns the timestamp prefix of `file_name` if it is a backup of `name`.
fn stamp_of<'a>(file_name: &'a str, name: &str) -> Option<&'a str> {
    let suffix = format!("-{}.{}", name, ARCHIVE_EXTENSION);
    let stamp = file_name.strip_suffix(suffix.as_str())?;
    stamp.bytes().all(|b| b.is_ascii_digit()).then_some(stamp)
}

/// Parses the date of a scheduled backup of `name`.
pub fn parse_scheduled_date(file_name: &str, name: &str) -> Option<NaiveDate> {
    let stamp = stamp_of(file_name, name)?;
    if stamp.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(stamp, DATE_FORMAT).ok()
}

/// Parses the timestamp of a manual backup of `name`.
pub fn parse_manual_time(file_name: &str, name: &str) -> Option<NaiveDateTime> {
    let stamp = stamp_of(file_name, name)?;
    if stamp.len() != 12 {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, MINUTE_FORMAT).ok()
}
