//! CLI integration tests
use std::io::Write;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("transfero").unwrap()
}

/// Writes a URL list pointing at an unresolvable test domain.
///
/// RFC 2606 reserves `.invalid`, so fetches fail fast without touching the
/// network; the batch still completes and reports the failures.
fn unreachable_url_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("urls.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "# test URL list").unwrap();
    writeln!(file, "https://one.test.invalid/page").unwrap();
    writeln!(file, "https://two.test.invalid/page").unwrap();
    path
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract and translate text"))
        .stdout(predicate::str::contains("--languages"))
        .stdout(predicate::str::contains("--workers"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success();
}

#[test]
fn test_cli_missing_input_file() {
    cmd().arg("nonexistent-urls.txt").assert().failure();
}

#[test]
fn test_cli_empty_url_list() {
    cmd()
        .arg("-")
        .write_stdin("# only a comment\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No URLs"));
}

#[test]
fn test_cli_batch_completes_despite_failures() {
    let tmp = TempDir::new().unwrap();
    let urls = unreachable_url_file(&tmp);

    cmd()
        .args(["--timeout", "5", "-l", "en"])
        .arg(urls.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed:    2"))
        .stdout(predicate::str::contains("Succeeded: 0"));
}

#[test]
fn test_cli_json_report() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.json");

    cmd()
        .args(["--timeout", "5", "-l", "en", "-f", "json", "-o"])
        .arg(output.to_str().unwrap())
        .arg("-")
        .write_stdin("https://one.test.invalid/page\n")
        .assert()
        .success();

    let report = std::fs::read_to_string(&output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(parsed["total"], 1);
    assert_eq!(parsed["failed"], 1);
    assert_eq!(parsed["pages"][0]["status"], "failed");
}

#[test]
fn test_cli_stdin_input() {
    cmd()
        .args(["--timeout", "5", "-l", "en"])
        .arg("-")
        .write_stdin("one.test.invalid\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://one.test.invalid"));
}

#[test]
fn test_cli_verbose_banner() {
    cmd()
        .args(["-v", "--timeout", "5", "-l", "en"])
        .arg("-")
        .write_stdin("https://one.test.invalid/page\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Transfero"));
}

#[test]
fn test_cli_rejects_unknown_format() {
    cmd()
        .args(["-f", "xml"])
        .arg("-")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}
