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
        global::Tier,
        rotation::Action,
        testing::{self, RecordingArchiver},
    };

    use crate::{
        integration_tests::run_engine,
        test_utils::{NAME, at, date, list_dir, setup_site},
    };

    /// Daily only: today's backup is created, 8 days old is removed, 6 days old is kept.
    #[test]
    fn test_scenario_daily_only() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        let today = date(2025, 3, 13);
        testing::write_backup(&site.destination, Tier::Daily, date(2025, 3, 5), NAME)?;
        testing::write_backup(&site.destination, Tier::Daily, date(2025, 3, 7), NAME)?;

        let producer = RecordingArchiver::new();
        let report = run_engine(
            &site.config_path,
            &producer,
            &at(today, 3, 0),
            Action::Scheduled,
        )?;

        assert!(report.is_complete());
        assert_eq!(report.decision.due_tiers(), vec![Tier::Daily]);
        assert_eq!(producer.calls(), vec![site.source.clone()]);

        assert!(testing::has_backup(&site.destination, Tier::Daily, today, NAME));
        assert!(testing::has_backup(&site.destination, Tier::Daily, date(2025, 3, 7), NAME));
        assert!(!testing::has_backup(&site.destination, Tier::Daily, date(2025, 3, 5), NAME));

        for tier in [Tier::Manual, Tier::Weekly, Tier::Monthly, Tier::Yearly] {
            assert!(site.destination.join(tier.dir_name()).is_dir());
            assert!(list_dir(&site.destination.join(tier.dir_name()))?.is_empty());
        }
        assert!(!site.destination.join("www.tar.gz").exists());
        Ok(())
    }

    /// Weekly trigger day matches: a weekly backup is created and the one from
    /// exactly two weeks ago is removed.
    #[test]
    fn test_scenario_weekly_trigger() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({
                "weeklyEnabled": 1,
                "weeklyTriggerDay": 4,
                "weeklyRetentionWeeks": 2,
            }),
        )?;
        let thursday = date(2025, 3, 13);
        for d in [date(2025, 2, 20), date(2025, 2, 27), date(2025, 3, 6)] {
            testing::write_backup(&site.destination, Tier::Weekly, d, NAME)?;
        }

        let producer = RecordingArchiver::new();
        let report = run_engine(
            &site.config_path,
            &producer,
            &at(thursday, 3, 0),
            Action::Scheduled,
        )?;

        assert_eq!(report.decision.due_tiers(), vec![Tier::Daily, Tier::Weekly]);
        assert_eq!(producer.call_count(), 1);

        let weekly = |d| testing::has_backup(&site.destination, Tier::Weekly, d, NAME);
        assert!(weekly(thursday));
        assert!(weekly(date(2025, 3, 6)));
        assert!(!weekly(date(2025, 2, 27)));
        assert!(weekly(date(2025, 2, 20)));

        let pruning = report.pruning.as_ref().unwrap();
        assert!(
            pruning
                .removed
                .contains(&(Tier::Weekly, "20250227-www.tar.gz".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_weekly_not_on_other_days() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({ "weeklyEnabled": true, "weeklyTriggerDay": 4 }),
        )?;

        let producer = RecordingArchiver::new();
        let friday = date(2025, 3, 14);
        run_engine(
            &site.config_path,
            &producer,
            &at(friday, 3, 0),
            Action::Scheduled,
        )?;

        assert!(testing::has_backup(&site.destination, Tier::Daily, friday, NAME));
        assert!(list_dir(&site.destination.join("weekly"))?.is_empty());
        Ok(())
    }

    /// Manual: the artifact goes to the manual tier only and nothing is pruned.
    #[test]
    fn test_scenario_manual() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({ "weeklyEnabled": 1, "weeklyTriggerDay": 4 }),
        )?;
        let today = date(2025, 3, 13);
        testing::write_backup(&site.destination, Tier::Daily, date(2025, 2, 1), NAME)?;
        testing::write_backup(&site.destination, Tier::Weekly, date(2025, 2, 13), NAME)?;

        let producer = RecordingArchiver::new();
        let report = run_engine(
            &site.config_path,
            &producer,
            &at(today, 14, 30),
            Action::Manual,
        )?;

        assert!(report.pruning.is_none());
        assert_eq!(
            list_dir(&site.destination.join("manual"))?,
            vec!["202503131430-www.tar.gz".to_string()]
        );
        assert_eq!(
            list_dir(&site.destination.join("daily"))?,
            vec!["20250201-www.tar.gz".to_string()]
        );
        assert_eq!(
            list_dir(&site.destination.join("weekly"))?,
            vec!["20250213-www.tar.gz".to_string()]
        );
        assert!(!site.destination.join("www.tar.gz").exists());
        Ok(())
    }

    #[test]
    fn test_manual_runs_are_kept() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        let producer = RecordingArchiver::new();

        run_engine(
            &site.config_path,
            &producer,
            &at(date(2024, 1, 2), 9, 5),
            Action::Manual,
        )?;
        run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )?;

        assert_eq!(
            list_dir(&site.destination.join("manual"))?,
            vec!["202401020905-www.tar.gz".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_second_run_same_day_changes_nothing() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({
                "weeklyEnabled": 1,
                "weeklyTriggerDay": 4,
                "monthlyEnabled": 1,
                "monthlyTriggerDay": 13,
            }),
        )?;
        let today = at(date(2025, 3, 13), 3, 0);
        let producer = RecordingArchiver::new();

        let first = run_engine(&site.config_path, &producer, &today, Action::Scheduled)?;
        assert_eq!(
            first.decision.due_tiers(),
            vec![Tier::Daily, Tier::Weekly, Tier::Monthly]
        );

        let snapshot = |tier: Tier| list_dir(&site.destination.join(tier.dir_name()));
        let before = Tier::ALL
            .into_iter()
            .map(snapshot)
            .collect::<Result<Vec<_>>>()?;

        let second = run_engine(&site.config_path, &producer, &today, Action::Scheduled)?;
        let after = Tier::ALL
            .into_iter()
            .map(snapshot)
            .collect::<Result<Vec<_>>>()?;

        assert!(!second.decision.any_due());
        assert!(second.distribution.is_none());
        assert_eq!(producer.call_count(), 1);
        assert_eq!(before, after);
        Ok(())
    }

    /// Expired backups wait until a run where some tier is due.
    #[test]
    fn test_no_pruning_when_nothing_is_due() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({ "dailyDays": [1] }))?;
        testing::write_backup(&site.destination, Tier::Daily, date(2025, 3, 3), NAME)?;

        let producer = RecordingArchiver::new();
        let report = run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )?;

        assert!(!report.decision.any_due());
        assert!(report.pruning.is_none());
        assert_eq!(producer.call_count(), 0);
        assert!(testing::has_backup(&site.destination, Tier::Daily, date(2025, 3, 3), NAME));
        Ok(())
    }

    #[test]
    fn test_monthly_and_yearly_retention() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(
            tmp_dir.path(),
            json!({
                "monthlyEnabled": 1,
                "monthlyTriggerDay": 1,
                "monthlyRetentionMonths": 12,
                "yearlyEnabled": 1,
                "yearlyTriggerDayOfYear": 0,
                "yearlyRetentionYears": 0,
            }),
        )?;
        let new_year = date(2025, 1, 1);
        testing::write_backup(&site.destination, Tier::Monthly, date(2024, 1, 1), NAME)?;
        testing::write_backup(&site.destination, Tier::Monthly, date(2024, 2, 1), NAME)?;
        testing::write_backup(&site.destination, Tier::Yearly, date(2024, 1, 1), NAME)?;
        testing::write_backup(&site.destination, Tier::Yearly, date(2015, 1, 1), NAME)?;

        let producer = RecordingArchiver::new();
        let report = run_engine(
            &site.config_path,
            &producer,
            &at(new_year, 3, 0),
            Action::Scheduled,
        )?;

        assert_eq!(
            report.decision.due_tiers(),
            vec![Tier::Daily, Tier::Monthly, Tier::Yearly]
        );

        let has = |tier, d| testing::has_backup(&site.destination, tier, d, NAME);
        assert!(has(Tier::Monthly, new_year));
        assert!(!has(Tier::Monthly, date(2024, 1, 1)));
        assert!(has(Tier::Monthly, date(2024, 2, 1)));

        assert!(has(Tier::Yearly, new_year));
        assert!(has(Tier::Yearly, date(2024, 1, 1)));
        assert!(has(Tier::Yearly, date(2015, 1, 1)));
        Ok(())
    }

    #[test]
    fn test_other_backup_names_are_left_alone() -> Result<()> {
        let tmp_dir = tempdir()?;
        let site = setup_site(tmp_dir.path(), json!({}))?;
        testing::write_backup(&site.destination, Tier::Daily, date(2025, 3, 1), "db")?;
        std::fs::write(site.destination.join("daily").join("notes.txt"), b"keep me")?;

        let producer = RecordingArchiver::new();
        run_engine(
            &site.config_path,
            &producer,
            &at(date(2025, 3, 13), 3, 0),
            Action::Scheduled,
        )?;

        assert_eq!(
            list_dir(&site.destination.join("daily"))?,
            vec![
                "20250301-db.tar.gz".to_string(),
                "20250313-www.tar.gz".to_string(),
                "notes.txt".to_string(),
            ]
        );
        Ok(())
    }
}
