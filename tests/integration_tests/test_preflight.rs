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
        error::RunError,
        global::Tier,
        rotation::{Action, DestinationLock},
        testing::RecordingArchiver,
    };

    use crate::{
        integration_tests::run_engine,
        test_utils::{at, date, list_dir, setup_site},
    };

    fn run_error(err: &anyhow::Error) -> Option<&RunError> {
        err.downcast_ref::<RunError>()
    }

    #[test]
    fn test_missing_source() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({ "sourceDirectory": tmp_dir.path().join("nowhere") }),
        )?;

        let producer = RecordingArchiver::new();
        let err = run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )
        .unwrap_err();

        assert!(matches!(run_error(&err), Some(RunError::SourceNotFound(_))));
        assert!(!site.destination.exists());
        assert_eq!(producer.call_count(), 0);
        Ok(())
    }

    #[test]
    fn test_source_is_a_file() -> Result<()> {
        let tmp_dir = tempdir()?;
        let file = tmp_dir.path().join("file.txt");
        std::fs::write(&file, b"not a directory")?;
        let site = setup_site(tmp_dir.path(), json!({ "sourceDirectory": file }))?;

        let producer = RecordingArchiver::new();
        let err = run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Manual,
        )
        .unwrap_err();

        assert!(matches!(run_error(&err), Some(RunError::SourceNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_destination_unwritable() -> Result<()> {
        let tmp_dir = tempdir()?;
        let blocker = tmp_dir.path().join("blocker");
        std::fs::write(&blocker, b"")?;
        let site = setup_site(
            tmp_dir.path(),
            json!({ "destinationRoot": blocker.join("backups") }),
        )?;

        let producer = RecordingArchiver::new();
        let err = run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )
        .unwrap_err();

        assert!(matches!(
            run_error(&err),
            Some(RunError::DestinationUnwritable { .. })
        ));
        assert_eq!(producer.call_count(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({ "name": "" }))?;

        let producer = RecordingArchiver::new();
        let err = run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )
        .unwrap_err();

        assert!(matches!(run_error(&err), Some(RunError::Config(_))));
        assert!(!site.destination.exists());
        Ok(())
    }

    #[test]
    fn test_out_of_range_trigger_day() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({ "weeklyEnabled": 1, "weeklyTriggerDay": 8 }),
        )?;

        let producer = RecordingArchiver::new();
        let err = run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )
        .unwrap_err();

        assert!(matches!(run_error(&err), Some(RunError::Config(_))));
        Ok(())
    }

    /// A second run on the same destination is refused while the first holds the lock.
    #[test]
    fn test_concurrent_run_is_refused() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        std::fs::create_dir_all(&site.destination)?;
        let held = DestinationLock::acquire(&site.destination)?;

        let producer = RecordingArchiver::new();
        let today = at(date(2025, 3, 13), 3, 0);
        let err = run_engine(&site.config_path, &producer, &today, Action::Scheduled).unwrap_err();

        assert!(matches!(run_error(&err), Some(RunError::Locked(_))));
        assert_eq!(producer.call_count(), 0);
        assert!(list_dir(&site.destination.join(Tier::Daily.dir_name()))?.is_empty());

        // Once released, the run goes through
        drop(held);
        let report = run_engine(&site.config_path, &producer, &today, Action::Scheduled)?;
        assert_eq!(report.decision.due_tiers(), vec![Tier::Daily]);
        assert_eq!(producer.call_count(), 1);
        Ok(())
    }
}
