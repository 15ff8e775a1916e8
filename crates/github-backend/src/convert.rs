//! Model conversions from GitHub types to activity-core records

use activity_core::{Commit, PullRequest, Repository};
use chrono::{DateTime, Utc};

use crate::error::{GitHubError, Result};
use crate::models::*;

/// Parse a GitHub ISO 8601 timestamp ("2024-01-15T10:30:00Z" or with an offset)
pub fn parse_github_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| GitHubError::Timestamp(s.to_string()))
}

impl TryFrom<GitHubCommitItem> for Commit {
    type Error = GitHubError;

    fn try_from(item: GitHubCommitItem) -> Result<Self> {
        let date = parse_github_datetime(&item.commit.author.date)?;
        Ok(Commit {
            repo: item.repository.full_name,
            message: item.commit.message,
            date,
        })
    }
}

impl From<GitHubIssue> for PullRequest {
    fn from(issue: GitHubIssue) -> Self {
        PullRequest {
            repo: issue.repository_full_name().to_string(),
            title: issue.title,
            url: issue.html_url,
        }
    }
}

/// Distinct repositories in first-seen order, capped at `limit`
pub fn distinct_repositories(items: &[GitHubCommitItem], limit: usize) -> Vec<Repository> {
    let mut repos: Vec<Repository> = Vec::new();
    for item in items {
        if repos.len() >= limit {
            break;
        }
        let name = &item.repository.full_name;
        if !repos.iter().any(|r| &r.name == name) {
            repos.push(Repository { name: name.clone() });
        }
    }
    repos
}
