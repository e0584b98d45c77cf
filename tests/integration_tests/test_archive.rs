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
    use std::fs::File;

    use anyhow::Result;
    use flate2::read::GzDecoder;
    use serde_json::json;
    use tempfile::tempdir;

    use tierback::{archiver::TarGzArchiver, global::Tier, rotation::Action, testing};

    use crate::{
        integration_tests::run_engine,
        test_utils::{NAME, at, date, list_dir, setup_site},
    };

    #[test]
    fn test_backups_unpack_to_the_source_tree() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({ "weeklyEnabled": 1, "weeklyTriggerDay": 4 }),
        )?;
        let today = date(2025, 3, 13);

        let report = run_engine(
            &site.config_path,
            &TarGzArchiver::new(),
            &at(today, 3, 0),
            Action::Scheduled,
        )?;
        assert!(report.is_complete());

        let daily = site.destination.join("daily").join("20250313-www.tar.gz");
        let weekly = site.destination.join("weekly").join("20250313-www.tar.gz");
        assert_eq!(std::fs::read(&daily)?, std::fs::read(&weekly)?);

        let unpacked = tmp_dir.path().join("restore");
        tar::Archive::new(GzDecoder::new(File::open(&daily)?)).unpack(&unpacked)?;

        assert_eq!(
            std::fs::read(unpacked.join("site").join("index.html"))?,
            std::fs::read(site.source.join("index.html"))?
        );
        assert_eq!(
            std::fs::read(unpacked.join("site").join("static").join("style.css"))?,
            std::fs::read(site.source.join("static").join("style.css"))?
        );

        // No staging or partial files are left at the root
        let mut root = list_dir(&site.destination)?;
        root.retain(|name| !name.starts_with('.'));
        assert_eq!(root, vec!["daily", "manual", "monthly", "weekly", "yearly"]);
        Ok(())
    }

    #[test]
    fn test_manual_backup_with_real_archive() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        testing::write_backup(&site.destination, Tier::Daily, date(2025, 3, 1), NAME)?;

        run_engine(
            &site.config_path,
            &TarGzArchiver::new(),
            &at(date(2025, 3, 13), 23, 59),
            Action::Manual,
        )?;

        let manual = site.destination.join("manual").join("202503132359-www.tar.gz");
        let mut archive = tar::Archive::new(GzDecoder::new(File::open(&manual)?));
        let mut entries = Vec::new();
        for entry in archive.entries()? {
            entries.push(entry?.path()?.to_string_lossy().into_owned());
        }
        assert!(entries.iter().any(|p| p == "site/index.html"));

        assert_eq!(
            list_dir(&site.destination.join("daily"))?,
            vec!["20250301-www.tar.gz".to_string()]
        );
        Ok(())
    }
}
