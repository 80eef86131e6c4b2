//! Plan fixtures shared by unit tests.

use jiff::{civil::DateTime, Timestamp};

use crate::models::Plan;

/// A plan last run 2024-03-09 22:00:05 local with a clean file count.
pub fn plan(name: &str, plan_type_code: i64, status_code: i64, age_hours: i64) -> Plan {
    Plan {
        company: "Acme".to_string(),
        computer: format!("{name}-PC"),
        plan_name: name.to_string(),
        plan_type_code,
        status_code,
        last_run_local: DateTime::constant(2024, 3, 9, 22, 0, 5, 0),
        last_run_text: "2024-03-09 @ 22:00:05".to_string(),
        last_run_at: Timestamp::from_second(1_710_043_205).unwrap(),
        last_run_age_hours: age_hours,
        report_url: None,
        files_scanned: 100,
        files_to_backup: 10,
        files_copied: 10,
        files_failed: 0,
    }
}

/// Override the four file counters of a fixture plan.
pub fn with_files(mut plan: Plan, scanned: i64, to_backup: i64, copied: i64, failed: i64) -> Plan {
    plan.files_scanned = scanned;
    plan.files_to_backup = to_backup;
    plan.files_copied = copied;
    plan.files_failed = failed;
    plan
}
