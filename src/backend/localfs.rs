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

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::StorageBackend;

/// The local filesystem.
#[derive(Default)]
pub struct LocalFS {}

impl LocalFS {
    pub fn new() -> Self {
        Self {}
    }
}

impl StorageBackend for LocalFS {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        std::fs::write(path, contents)
            .with_context(|| format!("Could not write to \'{}\'", path.display()))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::copy(from, to).with_context(|| {
            format!(
                "Could not copy \'{}\' to \'{}\'",
                from.display(),
                to.display()
            )
        })?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::rename(from, to).with_context(|| {
            format!(
                "Could not move \'{}\' to \'{}\'",
                from.display(),
                to.display()
            )
        })
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path)
            .with_context(|| format!("Could not remove \'{}\'", path.display()))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Could not create directory \'{}\'", path.display()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("Could not list directory \'{}\'", path.display()))?
        {
            let entry = entry?;
            paths.push(entry.path());
        }

        Ok(paths)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        std::fs::exists(path)
            .with_context(|| format!("Could not check if \'{}\' exists", path.display()))
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Could not read metadata of \'{}\'", path.display()))?;
        Ok(metadata.len())
    }
}
