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

pub mod defaults;

use std::sync::LazyLock;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::{commands::GlobalArgs, global::defaults::DEFAULT_VERBOSITY};

pub struct GlobalOpts {
    pub verbosity: u32,
}

impl Default for GlobalOpts {
    fn default() -> Self {
        Self {
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

pub static GLOBAL_OPTS: LazyLock<RwLock<GlobalOpts>> =
    LazyLock::new(|| RwLock::new(GlobalOpts::default()));

pub fn set_global_opts_with_args(global_args: &GlobalArgs) {
    let verbosity = if global_args.quiet {
        0
    } else {
        global_args.verbosity.unwrap_or(DEFAULT_VERBOSITY)
    };

    *GLOBAL_OPTS.write() = GlobalOpts { verbosity };
}

pub fn global_opts() -> RwLockReadGuard<'static, GlobalOpts> {
    GLOBAL_OPTS.read()
}

/// Current verbosity level.
#[inline]
pub fn verbosity() -> u32 {
    global_opts().verbosity
}

/// A retention category. Every tier owns one directory under the destination root.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Manual,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Manual,
        Tier::Daily,
        Tier::Weekly,
        Tier::Monthly,
        Tier::Yearly,
    ];

    /// Tiers driven by the calendar, in evaluation order.
    pub const SCHEDULED: [Tier; 4] = [Tier::Daily, Tier::Weekly, Tier::Monthly, Tier::Yearly];

    /// Name of the tier directory under the destination root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Tier::Manual => "manual",
            Tier::Daily => "daily",
            Tier::Weekly => "weekly",
            Tier::Monthly => "monthly",
            Tier::Yearly => "yearly",
        }
    }

    pub fn is_scheduled(&self) -> bool {
        !matches!(self, Tier::Manual)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.dir_name())
    }
}
