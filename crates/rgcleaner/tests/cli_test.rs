#![allow(deprecated)] // TODO: migrate Command::cargo_bin to cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;

/// Top-level help lists the subcommands
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("temporary Azure resource groups"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("patterns"))
        .stdout(predicate::str::contains("mcp"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rgcleaner"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

/// delete requires at least one name
#[test]
fn test_delete_without_names() {
    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.arg("delete")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<NAMES>"));
}

#[test]
fn test_delete_help() {
    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.arg("delete")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--audit"))
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("--exclude-list"));
}

/// Audit mode never reaches az, so it runs anywhere
#[test]
fn test_delete_audit_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let list = temp_dir.path().join("exclude-list.txt");
    std::fs::write(&list, "^rg-prod$\n").unwrap();

    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    let output = cmd
        .env("EXCLUDE_LIST_PATH", &list)
        .args(["delete", "rg-demo-app", "rg-prod", "MC_aks-cluster", "--audit", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "audit");
    assert_eq!(report["results"][0]["status"], "audit");
    assert_eq!(report["results"][1]["status"], "skipped");
    assert_eq!(report["results"][2]["reason"], "excluded by pattern");
}

/// Without --yes only the plan is shown
#[test]
fn test_delete_without_yes_is_dry_run() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.env("EXCLUDE_LIST_PATH", temp_dir.path().join("missing.txt"))
        .args(["delete", "rg-demo-app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("1 audited"));
}

#[test]
fn test_patterns_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let list = temp_dir.path().join("exclude-list.txt");
    std::fs::write(&list, "# keep\n^rg-prod$\n\n[broken\n").unwrap();

    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    let output = cmd
        .env("EXCLUDE_LIST_PATH", &list)
        .args(["patterns", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["builtIn"].as_array().unwrap().len(), 7);
    assert_eq!(report["fromFile"], serde_json::json!(["^rg-prod$", "[broken"]));
    assert_eq!(report["filePath"], list.display().to_string());
}

/// --exclude-list overrides EXCLUDE_LIST_PATH
#[test]
fn test_exclude_list_flag_wins() {
    let temp_dir = tempfile::tempdir().unwrap();
    let flag_list = temp_dir.path().join("flag.txt");
    std::fs::write(&flag_list, "^from-flag$\n").unwrap();

    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.env("EXCLUDE_LIST_PATH", temp_dir.path().join("env.txt"))
        .args(["patterns", "--exclude-list"])
        .arg(&flag_list)
        .assert()
        .success()
        .stdout(predicate::str::contains("^from-flag$"));
}

#[test]
fn test_invalid_pacing() {
    let mut cmd = Command::cargo_bin("rgcleaner").unwrap();
    cmd.args(["patterns", "--pacing-ms", "soon"])
        .assert()
        .failure();
}
