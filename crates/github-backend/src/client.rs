use std::sync::Arc;
use std::time::Duration;

use activity_core::{AliasDirectory, RetryPolicy};
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::{GitHubError, Result};
use crate::models::*;

/// Default number of commits fetched per lookup
pub const DEFAULT_COMMIT_LIMIT: usize = 20;
/// Default number of distinct repositories reported
pub const DEFAULT_REPOSITORY_LIMIT: usize = 5;
/// Commits scanned when collecting recent repositories (GitHub's default page)
pub const REPOSITORY_SEARCH_PAGE: usize = 30;

/// GitHub REST API client for the search endpoints
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
    retry: RetryPolicy,
    directory: Arc<AliasDirectory>,
    commit_limit: usize,
    repository_limit: usize,
}

impl GitHubClient {
    /// Create a new GitHub client targeting api.github.com
    pub fn new(token: Option<&str>, directory: Arc<AliasDirectory>) -> Self {
        Self::with_base_url("https://api.github.com", token, directory)
    }

    /// Create a new GitHub client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(
        base_url: &str,
        token: Option<&str>,
        directory: Arc<AliasDirectory>,
    ) -> Self {
        Self {
            agent: build_agent(Duration::from_secs(10)),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            retry: RetryPolicy::default(),
            directory,
            commit_limit: DEFAULT_COMMIT_LIMIT,
            repository_limit: DEFAULT_REPOSITORY_LIMIT,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    pub fn with_limits(mut self, commit_limit: usize, repository_limit: usize) -> Self {
        self.commit_limit = commit_limit.clamp(1, 100);
        self.repository_limit = repository_limit.max(1);
        self
    }

    pub fn directory(&self) -> &AliasDirectory {
        &self.directory
    }

    pub fn commit_limit(&self) -> usize {
        self.commit_limit
    }

    pub fn repository_limit(&self) -> usize {
        self.repository_limit
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        // Detect rate limiting: 403 with x-ratelimit-remaining: 0
        if status == 403 {
            if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
                if remaining.to_str().unwrap_or("") == "0" {
                    return Err(GitHubError::RateLimited);
                }
            }
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        if status == 401 {
            Err(GitHubError::Unauthorized)
        } else {
            Err(GitHubError::Api { status, message })
        }
    }

    /// GET a JSON document, retrying server errors per the retry policy
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.retry
            .run(
                |attempt| -> Result<T> {
                    debug!(%url, attempt, "GitHub request");
                    let mut request = self
                        .agent
                        .get(url)
                        .header("Accept", "application/vnd.github+json")
                        .header("X-GitHub-Api-Version", "2022-11-28");
                    if let Some(token) = &self.token {
                        request = request.header("Authorization", &format!("Bearer {}", token));
                    }

                    let response = request.call().map_err(GitHubError::Http)?;
                    let mut response = self.check_response(response)?;
                    let body: T = response.body_mut().read_json()?;
                    Ok(body)
                },
                GitHubError::is_retryable,
            )
            .map_err(|failure| {
                if failure.exhausted {
                    GitHubError::RetriesExhausted {
                        attempts: failure.attempts,
                        last: Box::new(failure.error),
                    }
                } else {
                    failure.error
                }
            })
    }

    fn search_url(&self, endpoint: &str, query: &str, extra: &str) -> String {
        format!(
            "{}/search/{}?q={}{}",
            self.base_url,
            endpoint,
            urlencoding::encode(query),
            extra
        )
    }

    // ==================== Commit Search ====================

    /// Search commits by author, newest first
    pub fn search_commits(&self, username: &str, per_page: usize) -> Result<GitHubCommitSearchResult> {
        let url = self.search_url(
            "commits",
            &format!("author:{}", username),
            &format!("&sort=author-date&order=desc&per_page={}", per_page),
        );
        self.get_json(&url)
    }

    /// Count all commits by author without fetching them
    pub fn count_commits(&self, username: &str) -> Result<u64> {
        let url = self.search_url("commits", &format!("author:{}", username), "&per_page=1");
        let result: GitHubCommitSearchResult = self.get_json(&url)?;
        Ok(result.total_count)
    }

    // ==================== Pull Request Search ====================

    /// Search open pull requests by author
    pub fn search_open_pull_requests(&self, username: &str) -> Result<GitHubIssueSearchResult> {
        let url = self.search_url(
            "issues",
            &format!("type:pr author:{} state:open", username),
            "&per_page=100",
        );
        self.get_json(&url)
    }

    /// Count open pull requests by author without fetching them
    pub fn count_open_pull_requests(&self, username: &str) -> Result<u64> {
        let url = self.search_url(
            "issues",
            &format!("type:pr author:{} state:open", username),
            "&per_page=1",
        );
        let result: GitHubIssueSearchResult = self.get_json(&url)?;
        Ok(result.total_count)
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}
