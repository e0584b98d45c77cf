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

//! Tier scheduling and retention.
//!
//! A run goes through a fixed sequence of stages:
//!
//! 1. Pre-flight checks on the configuration, the source and the destination.
//! 2. The destination lock is taken.
//! 3. [`evaluator::evaluate`] decides which tiers are due today.
//! 4. If any tier is due, the source is archived once.
//! 5. [`distributor::distribute`] places the artifact into the due tiers.
//! 6. [`pruner::prune`] expires old backups. Manual runs stop before this step.
//!
//! Every fatal condition is detected in stage 1 or 2, before any tier
//! directory is modified. From stage 5 on, failures are reported but
//! nothing is rolled back.

pub mod calendar;
pub mod distributor;
pub mod evaluator;
pub mod lock;
pub mod naming;
pub mod pruner;
pub mod store;

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use crate::{
    archiver::ArchiveProducer,
    backend::{StorageBackend, make_dry_backend},
    config::Config,
    error::RunError,
    global::defaults::PROBE_FILE_NAME,
    ui, utils,
};

pub use calendar::{Clock, FixedClock, SystemClock, Today};
pub use distributor::Distribution;
pub use evaluator::{Action, RunDecision, Verdict};
pub use lock::DestinationLock;
pub use pruner::PruneReport;
pub use store::TierStore;

/// Everything a run did.
#[derive(Debug)]
pub struct RunReport {
    pub decision: RunDecision,
    /// `None` if no tier was due
    pub distribution: Option<Distribution>,
    /// `None` if pruning did not run
    pub pruning: Option<PruneReport>,
}

impl RunReport {
    /// Number of steps that failed after the artifact was produced.
    pub fn failure_count(&self) -> usize {
        let distribution = self.distribution.as_ref().map_or(0, |d| {
            d.failed.len() + usize::from(d.cleanup_error.is_some())
        });
        let pruning = self.pruning.as_ref().map_or(0, |p| p.failed.len());
        distribution + pruning
    }

    pub fn is_complete(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Checks the source and the destination before anything is modified.
///
/// Creates the tier directories that are missing.
pub fn preflight(config: &Config, store: &TierStore) -> Result<()> {
    if !config.source_directory.is_dir() {
        return Err(RunError::SourceNotFound(config.source_directory.clone()).into());
    }

    let unwritable = |e: anyhow::Error| RunError::DestinationUnwritable {
        path: store.root().to_path_buf(),
        reason: format!("{e:#}"),
    };

    store.create_layout().map_err(unwritable)?;

    let probe = store.root().join(PROBE_FILE_NAME);
    store
        .backend()
        .write(&probe, b"")
        .and_then(|_| store.backend().remove_file(&probe))
        .map_err(unwritable)?;

    Ok(())
}

/// Runs the stages of a backup against one destination.
pub struct Engine<'a> {
    config: &'a Config,
    producer: &'a dyn ArchiveProducer,
    store: TierStore,
    dry_run: bool,
}

impl<'a> Engine<'a> {
    /// In a dry run, writes and deletes on the destination are ignored and the
    /// archive is not produced.
    pub fn new(
        config: &'a Config,
        backend: Arc<dyn StorageBackend>,
        producer: &'a dyn ArchiveProducer,
        dry_run: bool,
    ) -> Self {
        let store = TierStore::new(
            make_dry_backend(backend, dry_run),
            config.destination_root.clone(),
        );
        Self {
            config,
            producer,
            store,
            dry_run,
        }
    }

    pub fn store(&self) -> &TierStore {
        &self.store
    }

    /// Runs the pre-flight checks and evaluates the tiers without acting.
    pub fn check(&self, today: &Today, action: Action) -> Result<RunDecision> {
        preflight(self.config, &self.store)?;
        self.evaluate(today, action)
    }

    fn evaluate(&self, today: &Today, action: Action) -> Result<RunDecision> {
        evaluator::evaluate(
            today,
            action,
            &self.config.schedule,
            &self.config.name,
            |tier, file_name| self.store.contains(tier, file_name),
        )
    }

    pub fn run(&self, today: &Today, action: Action) -> Result<RunReport> {
        let config = self.config;
        preflight(config, &self.store)?;

        let _lock = match self.dry_run {
            true => None,
            false => Some(DestinationLock::acquire(self.store.root())?),
        };

        let decision = self.evaluate(today, action)?;
        for (tier, verdict) in decision.verdicts() {
            ui::cli::verbose_1!("{:>8}: {}", tier, verdict);
        }

        let mut report = RunReport {
            decision,
            distribution: None,
            pruning: None,
        };

        if !report.decision.any_due() {
            ui::cli::log!("No tier is due today");
            return Ok(report);
        }

        let staging = self.store.root().join(naming::staging_name(&config.name));
        let artifact = match self.dry_run {
            true => {
                ui::cli::log!("{} not archiving in a dry run", "Dry run:".bold().yellow());
                staging
            }
            false => self
                .producer
                .produce(&config.source_directory, &staging)
                .map_err(|e| RunError::Archive {
                    source_dir: config.source_directory.clone(),
                    reason: format!("{e:#}"),
                })?,
        };

        let distribution =
            distributor::distribute(&self.store, &artifact, &report.decision, &config.name, today)?;
        for (tier, path) in &distribution.placed {
            ui::cli::log!("{} {} backup {}", "Created".bold().green(), tier, path.display());
        }
        for (tier, e) in &distribution.failed {
            ui::cli::warning!("Could not place the {} backup: {:#}", tier, e);
        }
        if let Some(e) = &distribution.cleanup_error {
            ui::cli::warning!("Could not remove the staged archive: {:#}", e);
        }

        let is_manual = report.decision.is_manual();
        report.distribution = Some(distribution);
        if is_manual {
            return Ok(report);
        }

        let pruning = pruner::prune(&self.store, &config.schedule, &config.name, today.date());
        for (tier, file_name) in &pruning.removed {
            ui::cli::verbose_1!("{} {}/{}", "Removed".bold().purple(), tier, file_name);
        }
        for (tier, file_name) in &pruning.missing {
            ui::cli::verbose_2!("Nothing to expire: {}/{}", tier, file_name);
        }
        for (tier, file_name, e) in &pruning.failed {
            ui::cli::warning!("Could not prune {}/{}: {:#}", tier, file_name, e);
        }
        ui::cli::log!(
            "Pruned {}",
            utils::format_count(pruning.removed.len(), "backup", "backups")
        );

        report.pruning = Some(pruning);
        Ok(report)
    }
}
