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

//! Helpers shared by unit and integration tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::{archiver::ArchiveProducer, global::Tier, rotation::naming};

/// Content written by [`RecordingArchiver`].
pub const FAKE_ARCHIVE_CONTENT: &[u8] = b"fake archive";

/// Stands in for a real archiver. Writes a few bytes to the target and
/// remembers every source directory it was asked to archive.
#[derive(Default)]
pub struct RecordingArchiver {
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl ArchiveProducer for RecordingArchiver {
    fn produce(&self, source_dir: &Path, target: &Path) -> Result<PathBuf> {
        self.calls.lock().push(source_dir.to_path_buf());
        std::fs::write(target, FAKE_ARCHIVE_CONTENT)
            .with_context(|| format!("Failed to write \'{}\'", target.display()))?;
        Ok(target.to_path_buf())
    }
}

/// Places a scheduled backup dated `date` in a tier directory.
pub fn write_backup(root: &Path, tier: Tier, date: NaiveDate, name: &str) -> Result<PathBuf> {
    let dir = root.join(tier.dir_name());
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(naming::scheduled_name(date, name));
    std::fs::write(&path, FAKE_ARCHIVE_CONTENT)
        .with_context(|| format!("Failed to write \'{}\'", path.display()))?;
    Ok(path)
}

/// Whether the scheduled backup dated `date` exists in a tier directory.
pub fn has_backup(root: &Path, tier: Tier, date: NaiveDate, name: &str) -> bool {
    root.join(tier.dir_name())
        .join(naming::scheduled_name(date, name))
        .exists()
}

/// Creates a small directory tree to back up.
pub fn create_source_tree(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path.join("static"))?;
    std::fs::write(path.join("index.html"), b"<html></html>")?;
    std::fs::write(path.join("static").join("style.css"), b"body {}")?;
    Ok(())
}
