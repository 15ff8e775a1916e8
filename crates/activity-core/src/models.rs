use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::Person;
use crate::error::UnsupportedIntent;
use crate::window::TimeWindow;

/// Category of information a chat message asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    JiraOnly,
    GithubCommits,
    GithubPrs,
    GithubRepos,
    GithubOnly,
    Both,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::JiraOnly,
        Intent::GithubCommits,
        Intent::GithubPrs,
        Intent::GithubRepos,
        Intent::GithubOnly,
        Intent::Both,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::JiraOnly => "JIRA_ONLY",
            Intent::GithubCommits => "GITHUB_COMMITS",
            Intent::GithubPrs => "GITHUB_PRS",
            Intent::GithubRepos => "GITHUB_REPOS",
            Intent::GithubOnly => "GITHUB_ONLY",
            Intent::Both => "BOTH",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = UnsupportedIntent;

    /// Accepts the canonical names in any case, with `-` or `_` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
            .ok_or_else(|| UnsupportedIntent(s.to_string()))
    }
}

/// Result of interpreting one chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Person the message refers to, if any alias matched
    pub person: Option<Person>,
    pub intent: Intent,
    /// Recency filter; `None` means no filter
    pub window: Option<TimeWindow>,
}

/// A commit authored by a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Repository full name (e.g., "acme/api")
    pub repo: String,
    pub message: String,
    /// Author date
    pub date: DateTime<Utc>,
}

/// An open pull request authored by a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub repo: String,
    pub title: String,
    pub url: String,
}

/// A repository a person recently contributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
}

/// A Jira issue assigned to a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedIssue {
    /// Issue key (e.g., "PROJ-123")
    pub key: String,
    pub summary: String,
    /// Status name (e.g., "In Progress")
    pub status: String,
    /// Last update timestamp
    pub updated: DateTime<Utc>,
}

/// Aggregate GitHub activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub commits: u64,
    pub pull_requests: u64,
}

impl ActivitySummary {
    pub fn is_empty(&self) -> bool {
        self.commits == 0 && self.pull_requests == 0
    }
}
