//! CLI-level end-to-end tests, grounded on the teacher's
//! `faxc-drv/tests/e2e/cli_tests.rs` `assert_cmd` style.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn helium_cmd() -> Command {
    Command::cargo_bin("helium").expect("helium binary should build")
}

#[test]
fn help_lists_the_file_flag() {
    let mut cmd = helium_cmd();
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains("--file"));
}

#[test]
fn version_flag_prints_the_crate_version() {
    let mut cmd = helium_cmd();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn compiling_valid_source_exits_zero() {
    let mut cmd = helium_cmd();
    cmd.arg("-f").arg(fixtures_dir().join("arithmetic.he"));
    cmd.assert().success();
}

#[test]
fn emit_tokens_dumps_without_compiling() {
    let mut cmd = helium_cmd();
    cmd.arg("-f").arg(fixtures_dir().join("arithmetic.he")).arg("--emit-tokens");
    cmd.assert().success().stdout(predicate::str::contains("Symbol"));
}

#[test]
fn emit_ast_dumps_without_compiling() {
    let mut cmd = helium_cmd();
    cmd.arg("-f").arg(fixtures_dir().join("arithmetic.he")).arg("--emit-ast");
    cmd.assert().success().stdout(predicate::str::contains("Assign"));
}

#[test]
fn undefined_symbol_exits_nonzero_with_a_caret_diagnostic() {
    let mut cmd = helium_cmd();
    cmd.arg("-f").arg(fixtures_dir().join("undefined.he"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("undefined symbol 'ghost'"))
        .stderr(predicate::str::contains("^"));
}

#[test]
fn missing_file_exits_nonzero_without_a_caret_diagnostic() {
    let mut cmd = helium_cmd();
    cmd.arg("-f").arg(fixtures_dir().join("does-not-exist.he"));
    cmd.assert().failure().stderr(predicate::str::contains("failed to read"));
}
