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

#![cfg(test)]

mod tests {
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    use tierback::{
        commands::{GlobalArgs, cmd_check, cmd_list, cmd_manual, cmd_run},
        error::RunError,
        global::Tier,
    };

    use crate::test_utils::{list_dir, setup_site};

    fn global_args(config: std::path::PathBuf, dry_run: bool) -> GlobalArgs {
        GlobalArgs {
            config,
            dry_run,
            quiet: true,
            verbosity: None,
        }
    }

    #[test]
    fn test_run_manual_and_list() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        let global = global_args(site.config_path.clone(), false);

        cmd_run::run(&global, &cmd_run::CmdArgs {})?;
        assert_eq!(list_dir(&site.destination.join("daily"))?.len(), 1);

        cmd_manual::run(&global, &cmd_manual::CmdArgs {})?;
        assert_eq!(list_dir(&site.destination.join("manual"))?.len(), 1);

        cmd_list::run(&global, &cmd_list::CmdArgs { tier: None })?;
        cmd_list::run(
            &global,
            &cmd_list::CmdArgs {
                tier: Some(Tier::Manual),
            },
        )?;
        Ok(())
    }

    #[test]
    fn test_check_creates_layout_only() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({ "yearlyEnabled": 1 }))?;
        let global = global_args(site.config_path.clone(), false);

        cmd_check::run(&global, &cmd_check::CmdArgs {})?;

        for tier in Tier::ALL {
            let dir = site.destination.join(tier.dir_name());
            assert!(dir.is_dir());
            assert!(list_dir(&dir)?.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_dry_run_leaves_no_trace() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        let global = global_args(site.config_path.clone(), true);

        cmd_run::run(&global, &cmd_run::CmdArgs {})?;
        cmd_manual::run(&global, &cmd_manual::CmdArgs {})?;

        assert!(!site.destination.exists());
        Ok(())
    }

    #[test]
    fn test_missing_config_file() -> Result<()> {
        let tmp_dir = tempdir()?;
        let global = global_args(tmp_dir.path().join("missing.json"), false);

        let err = cmd_run::run(&global, &cmd_run::CmdArgs {}).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::Config(_))
        ));
        Ok(())
    }
}
