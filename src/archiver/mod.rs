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
    fs::File,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use flate2::{Compression, write::GzEncoder};
use indicatif::ProgressBar;

use crate::{
    global::{self, defaults::PARTIAL_SUFFIX},
    ui,
};

/// Produces the compressed snapshot of a directory.
pub trait ArchiveProducer {
    /// Archives `source_dir` into `target` and returns the path of the artifact.
    ///
    /// Either the artifact is complete or `target` does not exist.
    fn produce(&self, source_dir: &Path, target: &Path) -> Result<PathBuf>;
}

/// Writes a gzip-compressed tar archive.
///
/// The contents of the source directory are stored under a top-level entry
/// named after the directory.
pub struct TarGzArchiver {
    level: Compression,
}

impl Default for TarGzArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl TarGzArchiver {
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level),
        }
    }

    fn write_archive(&self, source_dir: &Path, partial: &Path) -> Result<()> {
        let entry_name = source_dir
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let file = File::create(partial)
            .with_context(|| format!("Could not create \'{}\'", partial.display()))?;
        let mut builder = tar::Builder::new(GzEncoder::new(file, self.level));
        builder.follow_symlinks(false);
        builder
            .append_dir_all(&entry_name, source_dir)
            .with_context(|| format!("Could not archive \'{}\'", source_dir.display()))?;

        let encoder = builder.into_inner()?;
        let file = encoder.finish()?;
        file.sync_all()?;
        Ok(())
    }
}

impl ArchiveProducer for TarGzArchiver {
    fn produce(&self, source_dir: &Path, target: &Path) -> Result<PathBuf> {
        if !source_dir.is_dir() {
            bail!("\'{}\' is not a directory", source_dir.display());
        }

        let partial = PathBuf::from(format!("{}.{}", target.display(), PARTIAL_SUFFIX));

        let spinner = match global::verbosity() {
            0 => ProgressBar::hidden(),
            _ => ProgressBar::new_spinner(),
        };
        spinner.set_style(ui::spinner_style());
        spinner.set_message(format!("Archiving {}...", source_dir.display()));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.write_archive(source_dir, &partial);
        spinner.finish_and_clear();

        if let Err(e) = result {
            let _ = std::fs::remove_file(&partial);
            return Err(e);
        }

        std::fs::rename(&partial, target).with_context(|| {
            format!(
                "Could not move \'{}\' to \'{}\'",
                partial.display(),
                target.display()
            )
        })?;

        Ok(target.to_path_buf())
    }
}
