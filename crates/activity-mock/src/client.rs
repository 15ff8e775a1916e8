//! Mock client implementing the activity traits
//!
//! Answers from a loaded `Scenario` and records every call.

use std::path::Path;
use std::sync::{Arc, Mutex};

use activity_core::{
    retain_within, ActivityError, ActivitySummary, AliasDirectory, AssignedIssue, Commit,
    GitHubActivity, JiraActivity, PullRequest, Repository, Result, System, TimeWindow,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scenario::{Scenario, ScenarioError};

/// Number of distinct repositories reported, as the live client does
const REPOSITORY_LIMIT: usize = 5;

/// A mock client that answers from scenario fixtures
pub struct MockClient {
    scenario: Scenario,
    directory: Arc<AliasDirectory>,
    calls: Mutex<Vec<CallLogEntry>>,
}

/// A single call log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,

    /// Trait method name
    pub method: String,

    /// Alias passed by the caller
    pub alias: String,

    /// Window in days, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<u32>,

    /// Error message (if call failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MockClient {
    pub fn new(scenario: Scenario, directory: Arc<AliasDirectory>) -> Self {
        Self {
            scenario,
            directory,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a MockClient from a scenario directory
    pub fn from_dir(
        dir: impl AsRef<Path>,
        directory: Arc<AliasDirectory>,
    ) -> std::result::Result<Self, ScenarioError> {
        Ok(Self::new(Scenario::load(dir)?, directory))
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<CallLogEntry> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Method names of the calls made so far
    pub fn call_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    fn record<T>(
        &self,
        method: &str,
        alias: &str,
        window: Option<TimeWindow>,
        result: &Result<T>,
    ) {
        debug!(method, alias, "mock activity call");
        let entry = CallLogEntry {
            timestamp: Utc::now(),
            method: method.to_string(),
            alias: alias.to_string(),
            window: window.map(|w| w.as_days()),
            error: result.as_ref().err().map(|e| e.to_string()),
        };
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    /// Same lookup and outage rules as the live clients
    fn check(&self, alias: &str, system: System) -> Result<()> {
        self.directory.resolve(alias, system)?;
        if self.scenario.is_unavailable(system) {
            return Err(ActivityError::ServiceUnavailable {
                system,
                attempts: 0,
                message: "simulated outage".to_string(),
            });
        }
        Ok(())
    }

    fn commits(&self, alias: &str, window: Option<TimeWindow>) -> Result<Vec<Commit>> {
        self.check(alias, System::GitHub)?;
        let now = Utc::now();
        let commits = self.scenario.commits_for(alias, now);
        Ok(retain_within(commits, window, now, |c| c.date))
    }
}

impl GitHubActivity for MockClient {
    fn recent_commits(&self, alias: &str, window: Option<TimeWindow>) -> Result<Vec<Commit>> {
        let result = self.commits(alias, window);
        self.record("recent_commits", alias, window, &result);
        result
    }

    fn open_pull_requests(&self, alias: &str) -> Result<Vec<PullRequest>> {
        let result = self
            .check(alias, System::GitHub)
            .map(|_| self.scenario.pull_requests_for(alias));
        self.record("open_pull_requests", alias, None, &result);
        result
    }

    fn recent_repositories(&self, alias: &str) -> Result<Vec<Repository>> {
        let result = self.commits(alias, None).map(|commits| {
            let mut repos: Vec<Repository> = Vec::new();
            for commit in commits {
                if repos.len() >= REPOSITORY_LIMIT {
                    break;
                }
                if !repos.iter().any(|r| r.name == commit.repo) {
                    repos.push(Repository { name: commit.repo });
                }
            }
            repos
        });
        self.record("recent_repositories", alias, None, &result);
        result
    }

    fn activity_summary(&self, alias: &str) -> Result<ActivitySummary> {
        let result = self.commits(alias, None).map(|commits| ActivitySummary {
            commits: commits.len() as u64,
            pull_requests: self.scenario.pull_requests_for(alias).len() as u64,
        });
        self.record("activity_summary", alias, None, &result);
        result
    }
}

impl JiraActivity for MockClient {
    fn assigned_issues(
        &self,
        alias: &str,
        window: Option<TimeWindow>,
    ) -> Result<Vec<AssignedIssue>> {
        let result = self.check(alias, System::Jira).map(|_| {
            let now = Utc::now();
            retain_within(self.scenario.issues_for(alias, now), window, now, |i| {
                i.updated
            })
        });
        self.record("assigned_issues", alias, window, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_core::Person;

    fn directory() -> Arc<AliasDirectory> {
        Arc::new(AliasDirectory::new([
            Person::new("john", Some("jdoe".into()), Some("acc-1".into())),
            Person::new("sarah", None, Some("acc-2".into())),
        ]))
    }

    fn scenario() -> Scenario {
        Scenario::from_toml_str(
            r#"
[[commits]]
alias = "john"
repo = "acme/api"
message = "fresh"
days_ago = 1

[[commits]]
alias = "john"
repo = "acme/web"
message = "old"
days_ago = 12

[[commits]]
alias = "john"
repo = "acme/api"
message = "older"
days_ago = 20

[[pull_requests]]
alias = "john"
repo = "acme/api"
title = "Add retries"
url = "https://github.com/acme/api/pull/1"

[[jira_issues]]
alias = "sarah"
key = "PROJ-9"
summary = "Plan sprint"
status = "To Do"
days_ago = 2
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_commits_respect_window() {
        let client = MockClient::new(scenario(), directory());

        let all = client.recent_commits("John", None).unwrap();
        assert_eq!(all.len(), 3);

        let week = client
            .recent_commits("john", Some(TimeWindow::days(7)))
            .unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].message, "fresh");

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].window, Some(7));
    }

    #[test]
    fn test_repositories_and_summary() {
        let client = MockClient::new(scenario(), directory());

        let repos = client.recent_repositories("john").unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["acme/api", "acme/web"]);

        let summary = client.activity_summary("john").unwrap();
        assert_eq!(summary.commits, 3);
        assert_eq!(summary.pull_requests, 1);
    }

    #[test]
    fn test_lookup_rules_match_live_clients() {
        let client = MockClient::new(scenario(), directory());

        // Sarah has no GitHub account
        let err = client.open_pull_requests("sarah").unwrap_err();
        assert!(err.is_lookup_failure());

        let issues = client.assigned_issues("sarah", None).unwrap();
        assert_eq!(issues[0].key, "PROJ-9");

        let calls = client.calls();
        assert_eq!(calls[0].error.as_deref(), Some("User 'Sarah' not found"));
        assert!(calls[1].error.is_none());
    }

    #[test]
    fn test_simulated_outage() {
        let mut scenario = scenario();
        scenario.unavailable.push(System::Jira);
        let client = MockClient::new(scenario, directory());

        let err = client.assigned_issues("sarah", None).unwrap_err();
        assert_eq!(err.to_string(), "Jira is temporarily unavailable");
        assert!(client.recent_commits("john", None).is_ok());
    }
}
