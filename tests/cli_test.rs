//! End-to-end tests for the robowrap binary

#![allow(clippy::expect_used)]

mod common;

use assert_cmd::Command;
use common::Fixture;
use predicates::prelude::*;

fn robowrap() -> Command {
    Command::cargo_bin("robowrap").expect("robowrap binary should build")
}

#[test]
fn test_prints_directory_command() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("robocopy \""))
        .stdout(predicate::str::contains(" /E "))
        .stdout(predicate::str::contains("/MOVE").not());
}

#[test]
fn test_prints_file_command_with_move() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.file)
        .arg(fx.backup())
        .args(["--move", "--threads", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file.txt\" /MOV /COPY:DAT /MT:16"));
}

#[test]
fn test_validation_failure_exits_2() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.file)
        .arg(fx.backup())
        .arg("--mirror")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "SANITY CHECK FAILED: cannot mirror a single file",
        ));
}

#[test]
fn test_missing_destination_parent() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.orphan())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_invalid_thread_count_is_usage_error() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .args(["--threads", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("thread count must be one of"));
}

#[test]
fn test_execute_missing_program_fails() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .args(["--execute", "--program", "robowrap-definitely-missing-binary"])
        .assert()
        .code(1)
        .stderr(predicate::function(|err: &str| {
            err.matches("program not found").count() == 1
        }));
}

#[cfg(unix)]
#[test]
fn test_execute_reports_exit_code() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .args(["--execute", "--program", "true"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("true \""))
        .stderr(predicate::str::contains("exit code 0"));

    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .args(["--execute", "--program", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exit code 1"));
}

#[cfg(unix)]
#[test]
fn test_execute_through_shell() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .args(["--execute", "--shell", "--program", "true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("exit code 0"));
}

#[cfg(unix)]
#[test]
fn test_quiet_execute_prints_nothing_on_stderr() {
    let fx = Fixture::new();
    robowrap()
        .arg(&fx.dir)
        .arg(fx.backup())
        .args(["-q", "--execute", "--program", "true"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("true \""))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_help_describes_huge_files_as_unbuffered() {
    robowrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("/J"))
        .stdout(predicate::str::contains("not a long-path"));
}
