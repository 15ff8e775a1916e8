use serde::{Deserialize, Serialize};

/// Jira issue as returned by the JQL search endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssue {
    /// Internal numeric ID
    pub id: Option<String>,
    /// Issue key (e.g., "PROJ-123")
    pub key: String,
    /// Issue fields
    pub fields: JiraIssueFields,
}

/// The subset of issue fields the search requests
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssueFields {
    /// Issue summary/title
    pub summary: String,
    /// Issue status
    pub status: JiraStatus,
    /// Last update timestamp (e.g., "2024-01-15T10:30:00.000+0000")
    pub updated: String,
}

/// Issue status
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraStatus {
    /// Status ID
    pub id: Option<String>,
    /// Status name
    pub name: String,
}

/// Body of `POST /rest/api/3/search/jql`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchRequest {
    pub jql: String,
    pub fields: Vec<String>,
    pub max_results: usize,
}

/// Search results
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchResult {
    /// Issues in this page
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
    /// Present when more pages exist
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub is_last: Option<bool>,
}
