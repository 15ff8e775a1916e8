//! Scenario definition and loading

use std::path::Path;

use activity_core::{AssignedIssue, Commit, PullRequest, System};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Canned activity for a set of people
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    /// Systems that fail as if retries were exhausted
    #[serde(default)]
    pub unavailable: Vec<System>,

    #[serde(default)]
    pub scenario: ScenarioMeta,

    /// Commits, newest first per person after loading
    #[serde(default)]
    pub commits: Vec<FixtureCommit>,

    /// Open pull requests
    #[serde(default)]
    pub pull_requests: Vec<FixturePullRequest>,

    /// Assigned Jira issues
    #[serde(default)]
    pub jira_issues: Vec<FixtureIssue>,
}

/// Scenario metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCommit {
    pub alias: String,
    pub repo: String,
    pub message: String,
    /// Absolute timestamp; wins over `days_ago`
    pub date: Option<DateTime<Utc>>,
    /// Age relative to the moment the fixture is read
    pub days_ago: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturePullRequest {
    pub alias: String,
    pub repo: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureIssue {
    pub alias: String,
    pub key: String,
    pub summary: String,
    pub status: String,
    pub date: Option<DateTime<Utc>>,
    pub days_ago: Option<u32>,
}

fn resolve_time(
    date: Option<DateTime<Utc>>,
    days_ago: Option<u32>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    date.unwrap_or_else(|| now - Duration::days(i64::from(days_ago.unwrap_or(0))))
}

fn same_alias(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl Scenario {
    /// Load `scenario.toml` from a scenario directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = dir.as_ref().join(crate::SCENARIO_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_unavailable(&self, system: System) -> bool {
        self.unavailable.contains(&system)
    }

    /// Commits of `alias`, newest first
    pub fn commits_for(&self, alias: &str, now: DateTime<Utc>) -> Vec<Commit> {
        let mut commits: Vec<Commit> = self
            .commits
            .iter()
            .filter(|c| same_alias(&c.alias, alias))
            .map(|c| Commit {
                repo: c.repo.clone(),
                message: c.message.clone(),
                date: resolve_time(c.date, c.days_ago, now),
            })
            .collect();
        commits.sort_by(|a, b| b.date.cmp(&a.date));
        commits
    }

    pub fn pull_requests_for(&self, alias: &str) -> Vec<PullRequest> {
        self.pull_requests
            .iter()
            .filter(|p| same_alias(&p.alias, alias))
            .map(|p| PullRequest {
                repo: p.repo.clone(),
                title: p.title.clone(),
                url: p.url.clone(),
            })
            .collect()
    }

    pub fn issues_for(&self, alias: &str, now: DateTime<Utc>) -> Vec<AssignedIssue> {
        self.jira_issues
            .iter()
            .filter(|i| same_alias(&i.alias, alias))
            .map(|i| AssignedIssue {
                key: i.key.clone(),
                summary: i.summary.clone(),
                status: i.status.clone(),
                updated: resolve_time(i.date, i.days_ago, now),
            })
            .collect()
    }
}
