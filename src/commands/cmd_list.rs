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
    backend::localfs::LocalFS,
    config::Config,
    global::Tier,
    rotation::{TierStore, naming},
    ui::{
        self,
        table::{Alignment, Table},
    },
    utils,
};

use super::GlobalArgs;

/// Lists the backups kept in every tier, newest first
#[derive(Parser, Debug)]
pub struct CmdArgs {
    /// Only list this tier (manual, daily, weekly, monthly or yearly)
    #[clap(long, value_parser = parse_tier)]
    pub tier: Option<Tier>,
}

fn parse_tier(s: &str) -> Result<Tier, String> {
    Tier::ALL
        .into_iter()
        .find(|tier| tier.dir_name() == s.to_lowercase())
        .ok_or_else(|| format!("Unknown tier '{s}'"))
}

/// Date shown for a backup, or an empty string if its name carries no timestamp.
fn display_date(tier: Tier, file_name: &str, name: &str) -> String {
    match tier {
        Tier::Manual => naming::parse_manual_time(file_name, name)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
        _ => naming::parse_scheduled_date(file_name, name).map(|d| d.format("%Y-%m-%d").to_string()),
    }
    .unwrap_or_default()
}

pub fn run(global_args: &GlobalArgs, args: &CmdArgs) -> Result<()> {
    let config = Config::load(&global_args.config)?;
    let store = TierStore::new(Arc::new(LocalFS::new()), config.destination_root.clone());

    let tiers: Vec<Tier> = match args.tier {
        Some(tier) => vec![tier],
        None => Tier::ALL.to_vec(),
    };

    let mut table = Table::new(vec![
        "Tier".bold().to_string(),
        "Date".bold().to_string(),
        "Name".bold().to_string(),
        "Size".bold().to_string(),
    ]);
    table.set_column_alignment(3, Alignment::Right);

    let mut counts = Vec::new();
    let mut total_size = 0;
    for tier in tiers {
        let mut names = store.list(tier)?;
        names.reverse();

        let mut count = 0;
        for file_name in names {
            let date = display_date(tier, &file_name, &config.name);
            if date.is_empty() {
                ui::cli::verbose_2!("Skipping {}/{}", tier, file_name);
                continue;
            }

            let size = store.size_of(tier, &file_name)?;
            total_size += size;
            count += 1;
            table.add_row(vec![
                tier.to_string(),
                date,
                file_name,
                utils::format_size(size),
            ]);
        }
        counts.push(format!("{tier}: {count}"));
    }

    if table.is_empty() {
        ui::cli::log!("No backups of '{}' found", config.name);
        return Ok(());
    }

    ui::cli::log_always!("{}", table.render());
    ui::cli::log!("{}", counts.join(", "));
    ui::cli::log!("Total size: {}", utils::format_size(total_size));

    Ok(())
}
