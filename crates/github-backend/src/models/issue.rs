use serde::{Deserialize, Serialize};

/// GitHub user (minimal representation)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
}

/// GitHub pull request indicator (presence means the issue is actually a PR)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubPullRequestRef {
    pub url: Option<String>,
    pub html_url: Option<String>,
}

/// Issue or pull request as returned by the issue search endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    /// API URL of the repository, e.g. `https://api.github.com/repos/acme/api`
    pub repository_url: String,
    pub user: Option<GitHubUser>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// If present (non-null), this "issue" is actually a pull request
    pub pull_request: Option<GitHubPullRequestRef>,
}

impl GitHubIssue {
    /// Returns true if this is actually a pull request, not an issue
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// `owner/name` of the repository this issue lives in
    pub fn repository_full_name(&self) -> &str {
        match self.repository_url.rsplit_once("repos/") {
            Some((_, full_name)) => full_name.trim_end_matches('/'),
            None => &self.repository_url,
        }
    }
}

/// GitHub issue search result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubIssueSearchResult {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<GitHubIssue>,
}
