//! CLI integration tests for haul.
//!
//! These tests verify argument parsing, help output, and exit codes for
//! the error conditions that must abort before any filesystem mutation.
//! None of them invokes the external copy tool.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the haul binary.
fn cmd() -> Command {
    Command::cargo_bin("haul").unwrap()
}

#[test]
fn test_help_enumerates_modes_and_formats() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transfer"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("transfer_groups"))
        .stdout(predicate::str::contains("header row"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("haul"));
}

#[test]
fn test_unknown_mode_letter_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("haul.yaml");
    fs::write(&config, "transfers: []\n").unwrap();

    cmd()
        .args(["x", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unrecognized operation letter 'x'"));
}

#[test]
fn test_unknown_flag_exits_nonzero() {
    cmd().arg("--bogus-flag").assert().failure();
}

#[test]
fn test_missing_config_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();

    cmd()
        .args(["v", "--config"])
        .arg(temp_dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_empty_job_set_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("haul.yaml");
    fs::write(&config, "transfers: []\n").unwrap();

    cmd()
        .args(["v", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no transfer jobs"));
}

#[test]
fn test_validate_only_reports_failed_job_but_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    let dest = temp_dir.path().join("dest");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&dest).unwrap();
    fs::write(source.join("a.txt"), "alpha").unwrap();
    fs::write(source.join("b.txt"), "beta").unwrap();
    fs::write(dest.join("a.txt"), "alpha").unwrap();

    let config = temp_dir.path().join("haul.yaml");
    fs::write(
        &config,
        format!(
            "transfers:\n  - source: {}\n    destination: {}\n",
            source.display(),
            dest.display()
        ),
    )
    .unwrap();

    cmd()
        .args(["v", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("validation failed"))
        .stdout(predicate::str::contains("b.txt"));
}

#[test]
fn test_validate_only_superset_destination_passes() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    let dest = temp_dir.path().join("dest");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&dest).unwrap();
    fs::write(source.join("a.txt"), "alpha").unwrap();
    fs::write(dest.join("a.txt"), "alpha").unwrap();
    fs::write(dest.join("unrelated.bin"), "prior transfer").unwrap();

    let config = temp_dir.path().join("haul.yaml");
    fs::write(
        &config,
        format!(
            "transfers:\n  - source: {}\n    destination: {}\n",
            source.display(),
            dest.display()
        ),
    )
    .unwrap();

    cmd()
        .args(["v", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded, 0 failed"));
}

#[test]
fn test_tabular_config_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    let dest = temp_dir.path().join("dest");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&dest).unwrap();

    let config = temp_dir.path().join("plan.csv");
    fs::write(
        &config,
        format!(
            "source,destination\n# comment row\n{},{}\n",
            source.display(),
            dest.display()
        ),
    )
    .unwrap();

    cmd()
        .args(["v", "--config"])
        .arg(&config)
        .assert()
        .success();
}
