//! Integration tests for the LocalVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! master password comes from `LOCALVAULT_PASSWORD` and entry passwords
//! are piped on stdin, so nothing waits on a prompt.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "correct horse battery";

/// Helper: get a Command pointing at the localvault binary.
fn localvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("localvault").expect("binary should exist")
}

/// Helper: a command running inside `tmp` with the master password set.
fn in_dir(tmp: &TempDir) -> Command {
    let mut cmd = localvault();
    cmd.current_dir(tmp.path())
        .env("LOCALVAULT_PASSWORD", MASTER)
        .env_remove("LOCALVAULT_LOG");
    cmd
}

/// Helper: initialize the default vault inside `tmp`.
fn init_vault(tmp: &TempDir) {
    in_dir(tmp).arg("init").assert().success();
}

#[test]
fn help_flag_shows_usage() {
    localvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local-first encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("setting"))
        .stdout(predicate::str::contains("vaults"));
}

#[test]
fn version_flag_shows_version() {
    localvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("localvault"));
}

#[test]
fn no_args_shows_help() {
    localvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_creates_vault_and_catalog() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    tmp.child(".localvault/default.vault")
        .assert(predicate::path::exists());
    tmp.child(".localvault/vaults.json")
        .assert(predicate::str::contains("default.vault"));
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    in_dir(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has a master password"));
}

#[test]
fn init_rejects_short_password() {
    let tmp = TempDir::new().unwrap();
    in_dir(&tmp)
        .env("LOCALVAULT_PASSWORD", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn add_then_get_password() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    in_dir(&tmp)
        .args(["add", "--title", "Bank", "--username", "alice", "--url", "bank.com"])
        .write_stdin("p@ss\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("entry 1"));

    in_dir(&tmp)
        .args(["get", "1"])
        .assert()
        .success()
        .stdout("p@ss\n");

    in_dir(&tmp)
        .args(["get", "1", "--field", "username"])
        .assert()
        .success()
        .stdout("alice\n");
}

#[test]
fn list_shows_titles_but_not_passwords() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    in_dir(&tmp)
        .args(["add", "--title", "Mail", "--username", "bob"])
        .write_stdin("hunter2\n")
        .assert()
        .success();

    in_dir(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mail"))
        .stdout(predicate::str::contains("bob"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn wrong_master_password_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    in_dir(&tmp)
        .env("LOCALVAULT_PASSWORD", "not the password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong master password"));
}

#[test]
fn get_on_missing_vault_fails() {
    let tmp = TempDir::new().unwrap();
    in_dir(&tmp)
        .args(["get", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault not found"));
}

#[test]
fn get_missing_entry_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    in_dir(&tmp)
        .args(["get", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry 42 not found"));
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    in_dir(&tmp)
        .args(["add", "--title", "Router"])
        .write_stdin("admin\n")
        .assert()
        .success();
    in_dir(&tmp)
        .args(["delete", "1", "--force"])
        .assert()
        .success();
    in_dir(&tmp).args(["get", "1"]).assert().failure();
}

#[test]
fn settings_roundtrip_without_master_password() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    localvault()
        .current_dir(tmp.path())
        .args(["setting", "set", "backup.count", "10", "--type", "int"])
        .assert()
        .success();

    localvault()
        .current_dir(tmp.path())
        .args(["setting", "get", "backup.count"])
        .assert()
        .success()
        .stdout("10\n");

    localvault()
        .current_dir(tmp.path())
        .args(["setting", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("int"));
}

#[test]
fn generate_respects_length() {
    localvault()
        .args(["generate", "--length", "24"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| out.trim_end().chars().count() == 24));
}

#[test]
fn completions_bash_prints_script() {
    localvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("localvault"));
}
