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

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};

use crate::{
    archiver::TarGzArchiver,
    backend::localfs::LocalFS,
    config::Config,
    global::defaults::DEFAULT_CONFIG_PATH,
    rotation::{Action, Engine, SystemClock, Today},
    utils,
};

pub mod cmd_check;
pub mod cmd_list;
pub mod cmd_manual;
pub mod cmd_run;

// CLI arguments
#[derive(Parser, Debug)]
#[clap(
    version = env!("CARGO_PKG_VERSION"), // Version from crate metadata
    about = "tierback tiered backup rotation tool",
)]
pub struct Cli {
    // Subcommand. A scheduled run when absent.
    #[command(subcommand)]
    pub command: Option<Command>,

    // Global arguments
    #[clap(flatten)]
    pub global_args: GlobalArgs,
}

// List of commands
#[derive(Subcommand, Debug)]
pub enum Command {
    Run(cmd_run::CmdArgs),
    Manual(cmd_manual::CmdArgs),
    Check(cmd_check::CmdArgs),
    List(cmd_list::CmdArgs),
}

#[derive(Parser, Debug)]
#[clap(group = ArgGroup::new("verbosity_group").multiple(false))]
pub struct GlobalArgs {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Evaluate and log without writing or deleting anything
    #[clap(long, global = true)]
    pub dry_run: bool,

    /// Disable logging (verbosity = 0)
    #[clap(long, value_parser, group = "verbosity_group")]
    pub quiet: bool,

    /// Set the verbosity level [0-3]
    #[clap(short = 'v', long, value_parser, group = "verbosity_group")]
    pub verbosity: Option<u32>,
}

/// Loads the configuration and runs the engine against the local filesystem.
pub(crate) fn execute(global_args: &GlobalArgs, action: Action) -> Result<()> {
    let config = Config::load(&global_args.config)?;
    let producer = TarGzArchiver::new();
    let engine = Engine::new(
        &config,
        Arc::new(LocalFS::new()),
        &producer,
        global_args.dry_run,
    );

    let report = engine.run(&Today::from_clock(&SystemClock), action)?;
    if !report.is_complete() {
        anyhow::bail!(
            "The backup was created but {}",
            utils::format_count(report.failure_count(), "step failed", "steps failed")
        );
    }

    Ok(())
}

pub fn run(args: &Cli) -> Result<()> {
    match &args.command {
        None => execute(&args.global_args, Action::Scheduled),
        Some(Command::Run(cmd_args)) => cmd_run::run(&args.global_args, cmd_args),
        Some(Command::Manual(cmd_args)) => cmd_manual::run(&args.global_args, cmd_args),
        Some(Command::Check(cmd_args)) => cmd_check::run(&args.global_args, cmd_args),
        Some(Command::List(cmd_args)) => cmd_list::run(&args.global_args, cmd_args),
    }
}
