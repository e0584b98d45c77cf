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

pub mod dry;
pub mod localfs;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use dry::DryBackend;

/// Abstraction of the filesystem holding the tier directories.
///
/// Every mutation of the destination goes through this trait so that a dry
/// run can swap in a backend that only pretends to write.
pub trait StorageBackend: Send + Sync {
    /// Writes to file, creating the file if necessary.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Copies a file, overwriting the target if it exists.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    /// Renames a file, overwriting the target if it exists.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Removes a file.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Recursively create a directory and all of its parent components if they are missing.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// List all paths inside a directory.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Returns true if a path exists.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Size of a file in bytes.
    fn file_size(&self, path: &Path) -> Result<u64>;
}

/// Encapsulates a StorageBackend inside a DryBackend.
#[inline]
pub fn make_dry_backend(backend: Arc<dyn StorageBackend>, dry: bool) -> Arc<dyn StorageBackend> {
    match dry {
        true => Arc::new(DryBackend::new(backend)),
        false => backend,
    }
}
