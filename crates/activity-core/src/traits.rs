use crate::error::Result;
use crate::models::*;
use crate::window::TimeWindow;

/// GitHub activity lookups keyed by chat alias
///
/// Implementations resolve the alias through their `AliasDirectory` and
/// fail with `PersonNotFound` when the person has no GitHub identity.
pub trait GitHubActivity: Send + Sync {
    /// Newest commits first, filtered to `window` when given
    fn recent_commits(&self, alias: &str, window: Option<TimeWindow>) -> Result<Vec<Commit>>;

    /// Pull requests authored by the person that are still open
    fn open_pull_requests(&self, alias: &str) -> Result<Vec<PullRequest>>;

    /// Distinct repositories of the newest commits, most recent first
    fn recent_repositories(&self, alias: &str) -> Result<Vec<Repository>>;

    /// Total commit count and open pull request count
    fn activity_summary(&self, alias: &str) -> Result<ActivitySummary>;
}

/// Jira activity lookups keyed by chat alias
pub trait JiraActivity: Send + Sync {
    /// Issues assigned to the person, filtered to `window` by last update
    fn assigned_issues(&self, alias: &str, window: Option<TimeWindow>)
        -> Result<Vec<AssignedIssue>>;
}
