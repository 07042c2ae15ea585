#![allow(deprecated)]

/// End-to-end tests for the non-interactive subcommands
///
/// Each test runs the binary against its own temporary session database
/// with delays disabled.
use predicates::prelude::*;
use tempfile::TempDir;
mod common;

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    common::chatterbox_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn test_templates_prints_all_quick_prompts() {
    let dir = TempDir::new().unwrap();
    common::chatterbox_cmd(dir.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tell me a joke"))
        .stdout(predicate::str::contains("Recipe idea"));
}

#[test]
fn test_whoami_when_signed_out() {
    let dir = TempDir::new().unwrap();
    common::chatterbox_cmd(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_login_whoami_logout_cycle() {
    let dir = TempDir::new().unwrap();

    common::chatterbox_cmd(dir.path())
        .args(["login", "--email", "ada@example.com", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, ada!"));

    common::chatterbox_cmd(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as ada <ada@example.com>"));

    common::chatterbox_cmd(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    common::chatterbox_cmd(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_register_uses_given_name() {
    let dir = TempDir::new().unwrap();
    common::chatterbox_cmd(dir.path())
        .args([
            "register",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Ada Lovelace!"));
}

#[test]
fn test_login_rejects_invalid_email() {
    let dir = TempDir::new().unwrap();
    common::chatterbox_cmd(dir.path())
        .args(["login", "--email", "not-an-email", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email address"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_temp_dir, config_path) =
        common::temp_config_file("responder:\n  min_delay_ms: 5000\n  max_delay_ms: 10\n");
    let dir = TempDir::new().unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("chatterbox").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--config")
        .arg(config_path)
        .arg("--storage-path")
        .arg(dir.path().join("session.db"))
        .arg("templates");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must not exceed"));
}
