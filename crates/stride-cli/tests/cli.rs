use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("stride").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: stride"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--history"))
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--help"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("stride").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stride"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("stride").unwrap();
    cmd.arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: stride serve"))
        .stdout(predicate::str::contains("--port"));
}
