//! Integration tests for the PassVault CLI binary.
//!
//! The master password is supplied through `PASSVAULT_PASSWORD` and every
//! test writes a `.passvault.toml` with cheap Argon2 params into its own
//! temp dir, so nothing prompts and nothing is slow.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "Sup3rSecret!";

const FAST_CONFIG: &str = "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n";

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passvault").expect("binary should exist")
}

/// Helper: a temp dir with a fast config.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".passvault.toml").write_str(FAST_CONFIG).unwrap();
    tmp
}

/// Helper: a command against `dir` unlocked with `password`.
fn run(dir: &TempDir, password: &str) -> Command {
    let mut cmd = passvault();
    cmd.env("PASSVAULT_PASSWORD", password)
        .env_remove("PASSVAULT_LOG")
        .arg("--dir")
        .arg(dir.path());
    cmd
}

fn init(dir: &TempDir) {
    run(dir, MASTER).arg("init").assert().success();
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_prints_requested_length() {
    let tmp = workspace();
    passvault()
        .args(["generate", "--length", "20", "--dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\S{20}\n$").unwrap());
}

#[test]
fn generate_raises_short_length_and_warns() {
    let tmp = workspace();
    passvault()
        .args(["generate", "--length", "4", "--no-symbols", "--dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9]{8}\n$").unwrap())
        .stderr(predicate::str::contains("at least 8"));
}

#[test]
fn init_creates_both_files() {
    let tmp = workspace();
    init(&tmp);

    tmp.child("salt.dat").assert(predicate::path::is_file());
    tmp.child("passwords.enc").assert(predicate::path::is_file());
}

#[test]
fn init_twice_fails() {
    let tmp = workspace();
    init(&tmp);

    run(&tmp, MASTER)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_master_password() {
    let tmp = workspace();
    run(&tmp, "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8"));

    tmp.child("passwords.enc").assert(predicate::path::missing());
}

#[test]
fn get_before_init_fails() {
    let tmp = workspace();
    run(&tmp, MASTER)
        .args(["get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("passvault init"));
}

#[test]
fn add_then_get_prints_credential() {
    let tmp = workspace();
    init(&tmp);

    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved"));

    run(&tmp, MASTER)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn add_reads_piped_password() {
    let tmp = workspace();
    init(&tmp);

    run(&tmp, MASTER)
        .args(["add", "mail", "bob"])
        .write_stdin("piped-pass\n")
        .assert()
        .success();

    run(&tmp, MASTER)
        .args(["get", "mail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("piped-pass"));
}

#[test]
fn add_generate_prints_generated_password() {
    let tmp = workspace();
    init(&tmp);

    run(&tmp, MASTER)
        .args(["add", "bank", "alice", "--generate", "--length", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated password"));
}

#[test]
fn add_twice_reports_overwrite() {
    let tmp = workspace();
    init(&tmp);

    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "first"])
        .assert()
        .success();
    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "second"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overwritten"));

    run(&tmp, MASTER)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("first").not());
}

#[test]
fn get_all_prints_every_username() {
    let tmp = workspace();
    init(&tmp);
    for (user, pw) in [("alice", "a-pass"), ("bob", "b-pass")] {
        run(&tmp, MASTER)
            .args(["add", "github", user, "--password", pw])
            .assert()
            .success();
    }

    run(&tmp, MASTER)
        .args(["get", "github", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a-pass"))
        .stdout(predicate::str::contains("b-pass"));
}

#[test]
fn wrong_master_password_cannot_unlock() {
    let tmp = workspace();
    init(&tmp);
    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "hunter2"])
        .assert()
        .success();

    run(&tmp, "WrongPass!")
        .args(["get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not unlock vault"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn list_shows_services_without_passwords() {
    let tmp = workspace();
    init(&tmp);
    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "hunter2"])
        .assert()
        .success();

    run(&tmp, MASTER)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn list_on_empty_vault_is_informational() {
    let tmp = workspace();
    init(&tmp);

    run(&tmp, MASTER)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No credentials stored yet"));
}

#[test]
fn remove_force_deletes_credential() {
    let tmp = workspace();
    init(&tmp);
    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "hunter2"])
        .assert()
        .success();

    run(&tmp, MASTER)
        .args(["remove", "github", "alice", "--force"])
        .assert()
        .success();

    run(&tmp, MASTER)
        .args(["get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn vault_opens_after_config_is_edited() {
    let tmp = workspace();
    init(&tmp);
    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "hunter2"])
        .assert()
        .success();

    tmp.child(".passvault.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 2\nargon2_parallelism = 2\n")
        .unwrap();

    run(&tmp, MASTER)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn status_reports_counts() {
    let tmp = workspace();

    run(&tmp, MASTER)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No vault"));

    init(&tmp);
    run(&tmp, MASTER)
        .args(["add", "github", "alice", "--password", "hunter2"])
        .assert()
        .success();

    run(&tmp, MASTER)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 service(s), 1 credential(s)"))
        .stdout(predicate::str::contains("8192 KiB, 1 iteration(s), 1 lane(s)"));
}
