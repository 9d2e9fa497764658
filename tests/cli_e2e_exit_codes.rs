//! Exit code and top-level CLI behavior tests.

mod common;
use common::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    TestFixture::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_version() {
    TestFixture::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    TestFixture::new().command().assert().failure().code(2);
}

#[test]
fn test_runtime_error_exit_code() {
    TestFixture::new()
        .command()
        .args(["parse", "ftp://host/repo"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_config_flag_overrides_default_path() {
    let fixture = TestFixture::new().with_file("custom.yml", configs::BASIC);

    fixture
        .command()
        .args(["--config", "custom.yml", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.yml"));
}
