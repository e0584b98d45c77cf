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

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a run.
///
/// Everything except [`RunError::Archive`] is detected before the first tier
/// directory is touched.
#[derive(Error, Debug)]
pub enum RunError {
    /// A required setting is missing, empty or out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The directory to back up does not exist or is not a directory.
    #[error("Source directory '{}' not found", .0.display())]
    SourceNotFound(PathBuf),

    /// The destination root cannot be created or written to.
    #[error("Destination '{}' is not writable: {reason}", .path.display())]
    DestinationUnwritable { path: PathBuf, reason: String },

    /// The archive of the source directory could not be produced.
    #[error("Failed to archive '{}': {reason}", .source_dir.display())]
    Archive { source_dir: PathBuf, reason: String },

    /// Another run holds the destination lock.
    #[error("Destination '{}' is locked by another run", .0.display())]
    Locked(PathBuf),
}

impl RunError {
    pub fn config(msg: impl Into<String>) -> Self {
        RunError::Config(msg.into())
    }
}
