use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

#[allow(deprecated)]
fn sidedoc() -> Command {
    Command::cargo_bin("sidedoc").expect("binary")
}

fn write_source(name: &str, text: &str) -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let path = temp.path().join(name);
    fs::write(&path, text).unwrap();
    (temp, path)
}

fn run_json(path: &Path, extra: &[&str]) -> Value {
    let output = sidedoc()
        .arg("--json")
        .args(extra)
        .arg(path)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn prints_comments_beside_code() {
    let (_temp, path) = write_source("demo.py", "# note\nx = 1\ny = 2\n");

    sidedoc()
        .args(["--width", "40"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("x = 1").and(predicate::str::contains("│ note")))
        .stdout(predicate::str::contains("# note").not());
}

#[test]
fn json_report_describes_units() {
    let (_temp, path) = write_source("demo.py", "# note\nx = 1\ny = 2\n");
    let report = run_json(&path, &[]);

    assert_eq!(report["language"], "python");
    assert_eq!(report["source_lines"], report["mirror_lines"]);
    let units = report["units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[1]["comment"], "note");
    assert_eq!(units[1]["line"], 2);
    assert_eq!(units[1]["padding"], 1);
}

#[test]
fn file_without_final_newline_reports_level_panes() {
    let (_temp, path) = write_source("tail.py", "# note\nx = 1");
    let report = run_json(&path, &[]);

    assert_eq!(report["source_lines"], 1);
    assert_eq!(report["mirror_lines"], 1);
    assert_eq!(report["units"][1]["code_lines"], 1);
    assert_eq!(report["units"][1]["hidden_lines"], 0);
}

#[test]
fn flags_reach_the_alignment_config() {
    let (_temp, path) = write_source("demo.py", "# note\nx = 1\n");
    let report = run_json(&path, &["--borrow-forward", "--no-terminator"]);

    assert_eq!(report["config"]["deficit"], "BorrowForward");
    assert_eq!(report["config"]["comment_ends_with_terminator"], false);
    assert_eq!(report["units"][1]["comment_lines"], 0);
}

#[test]
fn doc_only_leaves_plain_comments_in_the_code() {
    let (_temp, path) = write_source("lib.rs", "// plain\n/// doc\nfn f() {}\n");
    let report = run_json(&path, &["--doc-only"]);

    let units = report["units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["code_lines"], 1);
    assert_eq!(units[1]["comment"], "doc");
}

#[test]
fn language_override_beats_extension() {
    let (_temp, path) = write_source("script.txt", "# note\necho hi\n");
    let report = run_json(&path, &["--language", "shell"]);

    assert_eq!(report["language"], "shell");
    assert_eq!(report["units"][1]["comment"], "note");
}

#[test]
fn unknown_language_is_rejected() {
    let (_temp, path) = write_source("a.py", "x = 1\n");

    sidedoc()
        .args(["--language", "cobol"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown language 'cobol'"));
}

#[test]
fn missing_file_fails_with_context() {
    sidedoc()
        .arg("does/not/exist.rs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
