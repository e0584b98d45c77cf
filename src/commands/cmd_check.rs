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

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::{
    archiver::TarGzArchiver,
    backend::localfs::LocalFS,
    config::Config,
    global::Tier,
    rotation::{Action, Engine, SystemClock, Today, Verdict, naming, pruner},
    ui::{self, table::Table},
};

use super::GlobalArgs;

/// Validates the configuration and destination, and shows which tiers are due today
#[derive(Parser, Debug)]
pub struct CmdArgs {}

pub fn run(global_args: &GlobalArgs, _args: &CmdArgs) -> Result<()> {
    let config = Config::load(&global_args.config)?;
    let producer = TarGzArchiver::new();
    let engine = Engine::new(
        &config,
        Arc::new(LocalFS::new()),
        &producer,
        global_args.dry_run,
    );

    let today = Today::from_clock(&SystemClock);
    let decision = engine.check(&today, Action::Scheduled)?;

    let mut table = Table::new(vec![
        "Tier".bold().to_string(),
        "Status".bold().to_string(),
        "Backup".bold().to_string(),
        "Expires today".bold().to_string(),
    ]);

    let todays_name = naming::scheduled_name(today.date(), &config.name);
    for tier in Tier::SCHEDULED {
        let verdict = decision.verdict(tier);
        let status = match verdict {
            Verdict::Due => verdict.to_string().green().to_string(),
            Verdict::AlreadyPresent => verdict.to_string().cyan().to_string(),
            _ => verdict.to_string(),
        };
        let backup = match verdict {
            Verdict::Due | Verdict::AlreadyPresent => todays_name.clone(),
            _ => "-".to_string(),
        };
        let expires = pruner::expiry_date(tier, &config.schedule, today.date())
            .map(|date| naming::scheduled_name(date, &config.name))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![tier.to_string(), status, backup, expires]);
    }

    ui::cli::log_always!("{}", table.render());
    ui::cli::log!(
        "Source {} and destination {} are ready",
        config.source_directory.display(),
        config.destination_root.display()
    );

    Ok(())
}
