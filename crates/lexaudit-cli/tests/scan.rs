use std::fs;

use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("lexaudit-cli").unwrap()
}

#[test]
fn scan_reads_letter_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let letter = dir.path().join("letter.txt");
    fs::write(
        &letter,
        "We will terminate immediately. Your conduct is a fraud.",
    )
    .unwrap();

    cmd()
        .args(["scan", letter.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Risk Grade: High (score: 8)"))
        .stdout(contains("Termination"))
        .stdout(contains("Defamation Risk"));
}

#[test]
fn scan_reads_letter_from_stdin_by_default() {
    cmd()
        .write_stdin("Please settle the outstanding amount.")
        .assert()
        .success()
        .stdout(contains("Risk Grade: Low (score: 2)"))
        .stdout(contains("Payment Demand"));
}

#[test]
fn clean_letter_reports_no_issues() {
    cmd()
        .write_stdin("Thank you for your letter. This is not legal advice.")
        .assert()
        .success()
        .stdout(contains("Risk Grade: Low (score: 0)"))
        .stdout(contains("No issues detected."));
}

#[test]
fn json_format_emits_report_object() {
    let output = cmd()
        .args(["--format", "json", "scan"])
        .write_stdin("Contact john@example.com today.")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["grade"], "Low");
    assert_eq!(value["total_score"], 2);
    assert_eq!(value["issue_count"], 1);
    assert_eq!(value["issues"][0]["category"], "Privacy");
    assert_eq!(value["issues"][0]["type"], "email exposure");
}

#[test]
fn config_file_overrides_grade_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lexaudit.toml");
    fs::write(&config, "[thresholds]\nmedium = 1\nhigh = 2\n").unwrap();

    cmd()
        .args(["--config", config.to_str().unwrap(), "scan"])
        .write_stdin("Please settle the outstanding amount.")
        .assert()
        .success()
        .stdout(contains("Risk Grade: High (score: 2)"));
}

#[test]
fn missing_file_fails_with_context() {
    cmd()
        .args(["scan", "/nonexistent/letter.txt"])
        .assert()
        .failure()
        .stderr(contains("failed to read letter"));
}
