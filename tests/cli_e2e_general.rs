//! End-to-end tests for top-level CLI behavior: help, version, exit codes,
//! and the `info` and `properties` commands.

mod common;
use common::prelude::*;

#[test]
fn test_help_lists_commands() {
    TestFixture::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("externals"))
        .stdout(predicate::str::contains("log"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("working-copies"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("properties"));
}

#[test]
fn test_version() {
    TestFixture::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("svn-externals "));
}

#[test]
fn test_no_subcommand_is_usage_error() {
    TestFixture::new()
        .command()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand() {
    TestFixture::new()
        .command()
        .arg("checkout")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_runtime_error_exit_code() {
    TestFixture::new()
        .command()
        .arg("externals")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_info_without_working_copy() {
    TestFixture::new()
        .command()
        .arg("info")
        .env("PATH", "")
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.json"))
        .stdout(predicate::str::contains("svn:          not found"))
        .stdout(predicate::str::contains("Working copy: none selected"));
}

#[test]
fn test_info_json() {
    let fixture = TestFixture::new().with_working_copy("wc");

    let output = fixture
        .command()
        .args(["info", "--json", "-C", "wc"])
        .env("PATH", "")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["svn_version"], serde_json::Value::Null);
    assert_eq!(report["working_copy"], "wc");
}

#[cfg(not(windows))]
#[test]
fn test_properties_without_tortoise() {
    TestFixture::new()
        .command()
        .arg("properties")
        .env("PATH", "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TortoiseSVN is not available"));
}

#[test]
fn test_log_level_flag_accepted() {
    TestFixture::new()
        .command()
        .args(["--log-level", "debug", "format"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("No changes found.\n");
}
