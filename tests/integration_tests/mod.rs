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

use std::{path::Path, sync::Arc};

use anyhow::Result;

use tierback::{
    archiver::ArchiveProducer,
    backend::localfs::LocalFS,
    config::Config,
    rotation::{Action, Engine, RunReport, Today},
};

mod test_archive;
mod test_commands;
mod test_preflight;
mod test_scenarios;

/// Loads a configuration file and runs the engine once.
fn run_engine(
    config_path: &Path,
    producer: &dyn ArchiveProducer,
    today: &Today,
    action: Action,
) -> Result<RunReport> {
    let config = Config::load(config_path)?;
    let engine = Engine::new(&config, Arc::new(LocalFS::new()), producer, false);
    engine.run(today, action)
}
