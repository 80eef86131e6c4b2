use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EVALUATED_AT: &str = "2024-03-10T17:00:00Z";

const PLANS: &str = r#"[
  {"CompanyName": "Acme", "ComputerName": "FS01", "PlanName": "Nightly Files",
   "PlanType": 3, "LastStart": "2024-03-10T01:00:00.417", "Status": 0,
   "DetailedReportLink": null,
   "FilesScanned": 0, "FilesToBackup": 0, "FilesCopied": 0, "FilesFailed": 0},
  {"CompanyName": "Acme", "ComputerName": "SQL01", "PlanName": "DB Restore Test",
   "PlanType": 8, "LastStart": "2024-03-10T11:00:00", "Status": 2,
   "DetailedReportLink": "https://example.com/report/7",
   "FilesScanned": 1, "FilesToBackup": 1, "FilesCopied": 1, "FilesFailed": 0},
  {"CompanyName": "Globex", "ComputerName": "HV02", "PlanName": "Weekly Check",
   "PlanType": 13, "LastStart": "2024-03-01T00:00:00", "Status": 4,
   "FilesScanned": 0, "FilesToBackup": 0, "FilesCopied": 0, "FilesFailed": 0},
  {"CompanyName": "Globex", "ComputerName": "VM07", "PlanName": "Image",
   "PlanType": 5, "LastStart": "2024-03-10T04:00:00", "Status": 1,
   "FilesScanned": 40, "FilesToBackup": 40, "FilesCopied": 40, "FilesFailed": 0}
]"#;

/// Temporary environment with isolated XDG config directories.
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    /// Command with --no-color and a pinned evaluation instant
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("backwatch").expect("Failed to find backwatch binary");
        cmd.env("XDG_CONFIG_HOME", self.dir.path())
            .env("XDG_CONFIG_DIRS", self.dir.path())
            .args(["--no-color", "--evaluated-at", EVALUATED_AT]);
        cmd
    }
}

#[test]
fn test_dry_run_prints_report() {
    let env = TestEnv::new();
    let input = env.write("plans.json", PLANS);

    env.cmd()
        .args(["--dry-run", "--input", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("*.:: SUMMARY ::.*"))
        .stdout(predicate::str::contains("There are 2 plans in good standing"))
        .stdout(predicate::str::contains("There are 2 plans in BAD standing."))
        .stdout(predicate::str::contains("Plan Name: DB Restore Test"))
        .stdout(predicate::str::contains("Plan Type: SQLResore"))
        .stdout(predicate::str::contains("Report: [View](https://example.com/report/7)"))
        .stdout(predicate::str::contains(
            "Last Run: 2024-03-01 @ 00:00:00 (227 hours ago)",
        ))
        .stdout(predicate::str::contains("FS01 (Acme)\n   - 0 files scanned"));
}

#[test]
fn test_ignore_type_flag() {
    let env = TestEnv::new();
    let input = env.write("plans.json", PLANS);

    env.cmd()
        .args([
            "--dry-run",
            "--ignore-type",
            "13",
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are 1 plans in BAD standing."))
        .stdout(predicate::str::contains("Weekly Check").not());
}

#[test]
fn test_settings_file_policy() {
    let env = TestEnv::new();
    let input = env.write("plans.json", PLANS);
    let settings = env.write(
        "settings.yml",
        "general:\n  ignored_plan_types: [13]\n  overdue_threshold_hours: 6\n",
    );

    // VM07 ran 8 hours ago: past a 6 hour threshold
    env.cmd()
        .args([
            "--dry-run",
            "--settings",
            settings.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are 1 plans in good standing"))
        .stdout(predicate::str::contains("There are 2 plans in BAD standing."))
        .stdout(predicate::str::contains("Computer Name: VM07"));
}

#[test]
fn test_default_settings_location() {
    let env = TestEnv::new();
    let input = env.write("plans.json", PLANS);
    fs::create_dir_all(env.dir.path().join("backwatch")).unwrap();
    env.write(
        "backwatch/settings.yml",
        "general:\n  ignored_plan_types: [13]\n",
    );

    env.cmd()
        .args(["--dry-run", "--input", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Check").not());
}

#[test]
fn test_overdue_threshold_flag_overrides_settings() {
    let env = TestEnv::new();
    let input = env.write("plans.json", PLANS);
    let settings = env.write("settings.yml", "general:\n  overdue_threshold_hours: 6\n");

    env.cmd()
        .args([
            "--dry-run",
            "--settings",
            settings.to_str().unwrap(),
            "--overdue-threshold",
            "12",
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Computer Name: VM07").not());
}

#[test]
fn test_reads_records_from_stdin() {
    let env = TestEnv::new();

    env.cmd()
        .args(["--dry-run", "--input", "-"])
        .write_stdin(PLANS)
        .assert()
        .success()
        .stdout(predicate::str::contains("There are 2 plans in good standing"));
}

#[test]
fn test_malformed_record_aborts_without_report() {
    let env = TestEnv::new();
    let input = env.write(
        "plans.json",
        r#"[{"CompanyName": "Acme", "PlanName": "Broken", "PlanType": 1,
             "Status": 0, "LastStart": "last tuesday"}]"#,
    );

    env.cmd()
        .args(["--dry-run", "--input", input.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed plan record #0 ('Broken')"));
}

#[test]
fn test_unknown_status_aborts_without_report() {
    let env = TestEnv::new();
    let input = env.write(
        "plans.json",
        r#"[{"PlanName": "Odd", "PlanType": 1, "Status": 12,
             "LastStart": "2024-03-10T09:00:00"}]"#,
    );

    env.cmd()
        .args(["--dry-run", "--input", input.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown plan status code 12"));
}

#[test]
fn test_missing_api_settings() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No `api` section in settings"));
}

#[test]
fn test_missing_telegram_settings() {
    let env = TestEnv::new();
    let input = env.write("plans.json", "[]");

    env.cmd()
        .args(["--input", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No `telegram` section in settings"));
}

#[test]
fn test_explicit_settings_must_exist() {
    let env = TestEnv::new();
    let input = env.write("plans.json", "[]");

    env.cmd()
        .args([
            "--dry-run",
            "--settings",
            env.dir.path().join("missing.yml").to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));
}

#[test]
fn test_empty_input_renders_headers() {
    let env = TestEnv::new();
    let input = env.write("plans.json", "[]");

    env.cmd()
        .args(["--dry-run", "--input", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are 0 plans in good standing"))
        .stdout(predicate::str::contains("*.:: FAILED PLANS ::.*"))
        .stdout(predicate::str::contains("*.:: WARNING BACKUPS ::.*"));
}

#[test]
fn test_logs_effective_policy() {
    let env = TestEnv::new();
    let input = env.write("plans.json", "[]");
    let settings = env.write("settings.yml", "general:\n  overdue_threshold_hours: 6\n");

    env.cmd()
        .env("RUST_LOG", "info")
        .args([
            "--dry-run",
            "--settings",
            settings.to_str().unwrap(),
            "--ignore-type",
            "13",
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "ignoring plan types {13}, overdue after 6h",
        ));
}

#[test]
fn test_names_are_escaped_for_chat_markdown() {
    let env = TestEnv::new();
    let input = env.write(
        "plans.json",
        r#"[{"CompanyName": "Acme", "ComputerName": "File_Server", "PlanName": "Nightly*Full",
             "PlanType": 1, "Status": 2, "LastStart": "2024-03-01T00:00"}]"#,
    );

    env.cmd()
        .args(["--dry-run", "--input", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Computer Name: File\\_Server"))
        .stdout(predicate::str::contains("Plan Name: Nightly\\*Full"))
        .stdout(predicate::str::contains("Last Run: 2024-03-01 @ 00:00 (227 hours ago)"));
}
