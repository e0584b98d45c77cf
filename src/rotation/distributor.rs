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

use anyhow::{Error, Result};

use crate::global::Tier;

use super::{calendar::Today, evaluator::RunDecision, naming, store::TierStore};

/// Where the artifact ended up.
#[derive(Debug, Default)]
pub struct Distribution {
    /// New backups, one per due tier
    pub placed: Vec<(Tier, PathBuf)>,
    /// Tiers that could not be populated
    pub failed: Vec<(Tier, Error)>,
    /// Error removing the staged artifact, if any
    pub cleanup_error: Option<Error>,
}

impl Distribution {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.cleanup_error.is_none()
    }
}

/// Places the artifact into every due tier.
///
/// On a manual run the artifact is moved into the manual tier and any error
/// is returned directly. On a scheduled run the artifact is copied into each
/// due tier and then removed. A failing tier does not stop the others; the
/// failures are collected in the returned [`Distribution`].
pub fn distribute(
    store: &TierStore,
    artifact: &Path,
    decision: &RunDecision,
    name: &str,
    today: &Today,
) -> Result<Distribution> {
    let mut distribution = Distribution::default();

    if decision.is_manual() {
        let file_name = naming::manual_name(today.now(), name);
        let path = store.move_in(artifact, Tier::Manual, &file_name)?;
        distribution.placed.push((Tier::Manual, path));
        return Ok(distribution);
    }

    let file_name = naming::scheduled_name(today.date(), name);
    for tier in decision.due_tiers() {
        match store.copy_in(artifact, tier, &file_name) {
            Ok(path) => distribution.placed.push((tier, path)),
            Err(e) => distribution.failed.push((tier, e)),
        }
    }

    if let Err(e) = store.backend().remove_file(artifact) {
        distribution.cleanup_error = Some(e);
    }

    Ok(distribution)
}
