//! End-to-end tests for CLI exit codes.
//!
//! These tests verify that the CLI returns the correct exit codes:
//!
//! - Exit code 0: Success
//! - Exit code 1: Runtime or configuration error
//! - Exit code 2: Invalid command-line usage (handled by clap)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.arg("--help").assert().code(0);
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.arg("--version").assert().code(0);
}

/// Exit code 0 is returned for completions generation.
#[test]
fn test_exit_code_completions() {
    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.arg("completions")
        .arg("bash")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("repo-backup"));
}

/// Exit code 1 is returned when the configuration file does not exist.
#[test]
fn test_exit_code_run_config_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.current_dir(temp.path())
        .arg("run")
        .arg("--config")
        .arg("nonexistent.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

/// Exit code 1 is returned for invalid YAML syntax.
#[test]
fn test_exit_code_error_invalid_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.path().join("config.yaml");

    std::fs::write(&config_file, "platform: [unclosed\n").unwrap();

    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.current_dir(temp.path())
        .arg("validate")
        .arg("--config")
        .arg(&config_file)
        .assert()
        .code(1);
}

/// Exit code 2 is returned for unknown command-line flags (handled by clap).
#[test]
fn test_exit_code_usage_unknown_flag() {
    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.arg("--unknown-flag-that-does-not-exist")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

/// Exit code 2 is returned for unknown subcommand.
#[test]
fn test_exit_code_usage_unknown_subcommand() {
    let mut cmd = cargo_bin_cmd!("repo-backup");

    cmd.arg("unknown-subcommand-xyz")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}
