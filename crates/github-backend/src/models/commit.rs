use serde::{Deserialize, Serialize};

/// Git author/committer signature inside a commit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubCommitSignature {
    pub name: Option<String>,
    pub email: Option<String>,
    /// ISO 8601 timestamp, with `Z` or an offset
    pub date: String,
}

/// Git-level commit data
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubCommitDetail {
    pub message: String,
    pub author: GitHubCommitSignature,
}

/// Repository reference embedded in commit search results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubRepositoryRef {
    pub name: Option<String>,
    pub full_name: String,
}

/// A single commit search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubCommitItem {
    pub sha: String,
    pub commit: GitHubCommitDetail,
    pub repository: GitHubRepositoryRef,
    pub html_url: Option<String>,
}

/// GitHub commit search result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubCommitSearchResult {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<GitHubCommitItem>,
}
