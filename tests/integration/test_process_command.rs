use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use tempfile::TempDir;

fn process_in(root: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("colab-bridge").unwrap();
    cmd.arg("process").arg("--root").arg(root);
    cmd
}

#[test]
fn test_process_uppercases_input() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    fs::write(
        temp_dir.path().join("data/input.txt"),
        "hello world\nthis is a test\n\nmixed Case Line\n",
    )
    .unwrap();

    process_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(lines: 3)"));

    let output = fs::read_to_string(temp_dir.path().join("data/output.txt")).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    let header = Regex::new(r"^# Generated at \d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}Z$").unwrap();
    assert!(header.is_match(lines[0]), "header: {}", lines[0]);
    assert_eq!(
        &lines[1..],
        &["HELLO WORLD", "THIS IS A TEST", "MIXED CASE LINE"]
    );
}

#[test]
fn test_process_without_input_writes_no_input() {
    let temp_dir = TempDir::new().unwrap();

    process_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(lines: 0)"));

    let output = fs::read_to_string(temp_dir.path().join("data/output.txt")).unwrap();
    assert_eq!(output.lines().nth(1), Some("NO_INPUT"));
    assert_eq!(output.lines().count(), 2);
}

#[test]
fn test_process_runs_differ_only_in_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    fs::write(temp_dir.path().join("data/input.txt"), "a\nb\n").unwrap();

    process_in(temp_dir.path()).assert().success();
    let first = fs::read_to_string(temp_dir.path().join("data/output.txt")).unwrap();
    process_in(temp_dir.path()).assert().success();
    let second = fs::read_to_string(temp_dir.path().join("data/output.txt")).unwrap();

    let body = |text: &str| text.lines().skip(1).map(str::to_string).collect::<Vec<_>>();
    assert_eq!(body(&first), body(&second));
}

#[test]
fn test_process_in_notebook_prints_only_the_summary() {
    let temp_dir = TempDir::new().unwrap();

    process_in(temp_dir.path())
        .env("COLAB_RELEASE_TAG", "release-colab_20261001")
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^Wrote .*output\.txt \(lines: 0\)\n$").unwrap());
}

#[test]
fn test_process_failure_exits_with_two() {
    let temp_dir = TempDir::new().unwrap();
    // A file where the data directory should be.
    fs::write(temp_dir.path().join("data"), "not a directory").unwrap();

    process_in(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[ERROR]"));
}
