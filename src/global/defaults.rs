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

// -- Files --
/// Extension shared by every archive the tool writes.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Advisory lock file, kept at the destination root.
pub const LOCK_FILE_NAME: &str = ".tierback.lock";

/// Scratch file used to check that the destination root is writable.
pub const PROBE_FILE_NAME: &str = ".tierback.probe";

/// Suffix of an archive that is still being written.
pub const PARTIAL_SUFFIX: &str = "partial";

// -- Configuration --
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tierback/config.json";

pub const DEFAULT_DAILY_DAYS: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];
/// Sunday
pub const DEFAULT_WEEKLY_TRIGGER_DAY: u32 = 7;
pub const DEFAULT_MONTHLY_TRIGGER_DAY: u32 = 1;
/// Zero-based, so this is the 1st of January.
pub const DEFAULT_YEARLY_TRIGGER_DAY: u32 = 0;

pub const DEFAULT_WEEKLY_RETENTION: u32 = 4;
pub const DEFAULT_MONTHLY_RETENTION: u32 = 12;
/// Unbounded
pub const DEFAULT_YEARLY_RETENTION: u32 = 0;

// -- Rotation --
/// The daily tier keeps exactly one week of backups.
pub const DAILY_RETENTION_WEEKS: u32 = 1;

// Display
pub const DEFAULT_VERBOSITY: u32 = 1;
