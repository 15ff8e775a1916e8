//! End-to-end CLI tests against the scenario mock backend.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .join("fixtures")
}

/// team-activity pointed at the shared people file and a mock scenario
fn team_activity(scenario: &str) -> Command {
    let fixtures = fixtures_path();
    let mut cmd = cargo_bin_cmd!("team-activity");
    cmd.env(
        "TEAM_ACTIVITY_MOCK_DIR",
        fixtures.join("scenarios").join(scenario),
    )
    .env("NO_COLOR", "1")
    .args(["--config", fixtures.join("people.toml").to_str().unwrap()]);
    cmd
}

#[test]
fn test_help() {
    let mut cmd = cargo_bin_cmd!("team-activity");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_parse_json() {
    let output = team_activity("team-standup")
        .args(["-o", "json", "parse", "What has John committed this week?"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["person"]["alias"], "John");
    assert_eq!(parsed["intent"], "GITHUB_COMMITS");
    assert_eq!(parsed["window"], 7);
}

#[test]
fn test_parse_without_person() {
    let output = team_activity("team-standup")
        .args(["-o", "json", "parse", "any tickets today?"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(parsed["person"].is_null());
    assert_eq!(parsed["intent"], "JIRA_ONLY");
    assert_eq!(parsed["window"], 1);
}

#[test]
fn test_ask_commits_within_window() {
    team_activity("team-standup")
        .args(["ask", "What has John committed this week?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent GitHub commits by John:"))
        .stdout(predicate::str::contains("- acme/api: Fix login redirect"))
        .stdout(predicate::str::contains("Bump dependencies").not());
}

#[test]
fn test_ask_both_json() {
    let output = team_activity("team-standup")
        .args(["-o", "json", "ask", "What is John working on?"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reply: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reply["success"], true);
    let data = reply["data"].as_str().unwrap();
    assert!(data.starts_with("John is working on 1 JIRA issue(s):"));
    assert!(data.contains("\n\nRecent GitHub commits by John:"));
}

#[test]
fn test_ask_person_without_github_account() {
    team_activity("team-standup")
        .args(["ask", "Show me Sarah's commits"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User 'Sarah' not found"));
}

#[test]
fn test_ask_unknown_person() {
    team_activity("team-standup")
        .args(["ask", "What is Bob doing?"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User not found"));
}

#[test]
fn test_ask_jira_outage() {
    team_activity("jira-outage")
        .args(["ask", "john's jira tickets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Jira is temporarily unavailable"));
}

#[test]
fn test_ask_intent_override() {
    team_activity("team-standup")
        .args(["ask", "john", "--intent", "github_prs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active pull requests by John:"))
        .stdout(predicate::str::contains("Add retry to payment client"));
}

#[test]
fn test_ask_unsupported_intent() {
    team_activity("team-standup")
        .args(["ask", "john", "--intent", "slack_only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported intent"));
}

#[test]
fn test_people() {
    team_activity("team-standup")
        .arg("people")
        .assert()
        .success()
        .stdout(predicate::str::contains("John"))
        .stdout(predicate::str::contains("mike-codes"))
        .stdout(predicate::str::contains("Sarah\n  GitHub: -"));
}

#[test]
fn test_missing_config_file() {
    let mut cmd = cargo_bin_cmd!("team-activity");
    cmd.args(["--config", "/nonexistent/team.toml", "people"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
