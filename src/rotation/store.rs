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
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;

use crate::{backend::StorageBackend, global::Tier};

/// The tier directories under a destination root, addressed by file name.
#[derive(Clone)]
pub struct TierStore {
    backend: Arc<dyn StorageBackend>,
    root: PathBuf,
}

impl TierStore {
    pub fn new(backend: Arc<dyn StorageBackend>, root: PathBuf) -> Self {
        Self { backend, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    pub fn tier_dir(&self, tier: Tier) -> PathBuf {
        self.root.join(tier.dir_name())
    }

    pub fn path_of(&self, tier: Tier, file_name: &str) -> PathBuf {
        self.tier_dir(tier).join(file_name)
    }

    /// Creates the destination root and every tier directory that is missing.
    pub fn create_layout(&self) -> Result<()> {
        self.backend.create_dir_all(&self.root)?;
        for tier in Tier::ALL {
            self.backend.create_dir_all(&self.tier_dir(tier))?;
        }
        Ok(())
    }

    pub fn contains(&self, tier: Tier, file_name: &str) -> Result<bool> {
        self.backend.exists(&self.path_of(tier, file_name))
    }

    /// Copies `artifact` into a tier. Returns the path of the new backup.
    pub fn copy_in(&self, artifact: &Path, tier: Tier, file_name: &str) -> Result<PathBuf> {
        let target = self.path_of(tier, file_name);
        self.backend.copy(artifact, &target)?;
        Ok(target)
    }

    /// Moves `artifact` into a tier. Returns the path of the new backup.
    pub fn move_in(&self, artifact: &Path, tier: Tier, file_name: &str) -> Result<PathBuf> {
        let target = self.path_of(tier, file_name);
        self.backend.rename(artifact, &target)?;
        Ok(target)
    }

    /// Removes a backup. Returns `false` if it was not there.
    pub fn remove(&self, tier: Tier, file_name: &str) -> Result<bool> {
        let path = self.path_of(tier, file_name);
        if !self.backend.exists(&path)? {
            return Ok(false);
        }
        self.backend.remove_file(&path)?;
        Ok(true)
    }

    /// File names present in a tier. A missing tier directory is empty.
    pub fn list(&self, tier: Tier) -> Result<Vec<String>> {
        let dir = self.tier_dir(tier);
        if !self.backend.exists(&dir)? {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = self
            .backend
            .read_dir(&dir)?
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn size_of(&self, tier: Tier, file_name: &str) -> Result<u64> {
        self.backend.file_size(&self.path_of(tier, file_name))
    }
}
