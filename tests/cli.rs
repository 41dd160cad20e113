//! End-to-end tests for the `vcl-lex` binary.

mod common;

use assert_cmd::Command;
use common::source_file;
use predicates::prelude::*;

fn vcl_lex() -> Command {
    let mut cmd = Command::cargo_bin("vcl-lex").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_source_prints_usage() {
    vcl_lex()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: "))
        .stdout(predicate::str::contains("<source.vcl>"))
        .stdout(predicate::str::contains("No source file is provided."));
}

#[test]
fn missing_source_prints_usage() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.vcl");
    vcl_lex()
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: "))
        .stdout(predicate::str::contains(format!(
            "Source file {} may not exist.",
            path.display()
        )));
}

#[test]
fn prints_one_line_per_token() {
    let file = source_file(b"# demo\nproc main() {\n  print \"hi\" 7;\n}\n");
    let path = file.path().display().to_string();
    let expected = [
        format!("{path}:2:1 (IDENTITY, proc)"),
        format!("{path}:2:6 (IDENTITY, main)"),
        format!("{path}:2:10 (OPEN_PAREN)"),
        format!("{path}:2:11 (CLOSE_PAREN)"),
        format!("{path}:2:13 (OPEN_CURLY)"),
        format!("{path}:3:3 (IDENTITY, print)"),
        format!("{path}:3:9 (STRING, \"hi\")"),
        format!("{path}:3:14 (NUMBER, 7)"),
        format!("{path}:3:15 (SEMICOLON)"),
        format!("{path}:4:1 (CLOSE_CURLY)"),
    ]
    .map(|line| line + "\n")
    .concat();

    vcl_lex().arg(file.path()).assert().success().stdout(expected);
}

#[test]
fn comments_only_prints_nothing() {
    let file = source_file(b"# nothing\n   # at all\n");
    vcl_lex()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn unclassifiable_character_aborts() {
    let file = source_file(b"ok;\n  @\nnever");
    let path = file.path().display().to_string();
    vcl_lex()
        .arg(file.path())
        .assert()
        .code(2)
        .stdout(format!("{path}:1:1 (IDENTITY, ok)\n{path}:1:3 (SEMICOLON)\n"))
        .stderr(predicate::str::contains("not implemented"))
        .stderr(predicate::str::contains(format!("{path}:2:3")));
}

#[test]
fn unterminated_string_aborts() {
    let file = source_file(b"\"open");
    vcl_lex()
        .arg(file.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unterminated string"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let file = source_file(b"x");
    let path = file.path().display().to_string();
    vcl_lex()
        .arg("-vv")
        .arg("--no-color")
        .arg(file.path())
        .assert()
        .success()
        .stdout(format!("{path}:1:1 (IDENTITY, x)\n"))
        .stderr(predicate::str::contains("scanned token"));
}

#[cfg(unix)]
#[test]
fn non_utf8_program_name_in_usage() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::process::CommandExt;

    let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("vcl-lex"));
    cmd.arg0(OsStr::from_bytes(b"vcl\xFFlex")).env_remove("RUST_LOG");
    Command::from_std(cmd)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: vcl\u{FFFD}lex <source.vcl>"))
        .stdout(predicate::str::contains("No source file is provided."));
}
