use std::sync::Arc;
use std::time::Duration;

use activity_core::{AliasDirectory, RetryPolicy};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;
use ureq::Agent;

use crate::error::{JiraError, Result};
use crate::models::*;

/// Fields requested for every issue
const SEARCH_FIELDS: &[&str] = &["summary", "status", "updated"];

/// Default page size for JQL searches
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Jira REST API client
pub struct JiraClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
    retry: RetryPolicy,
    directory: Arc<AliasDirectory>,
    max_results: usize,
}

impl JiraClient {
    /// Create a new Jira client with Basic Auth
    ///
    /// For Jira Cloud, use your email and an API token.
    pub fn new(
        base_url: &str,
        email: &str,
        api_token: &str,
        directory: Arc<AliasDirectory>,
    ) -> Self {
        let credentials = format!("{}:{}", email, api_token);
        let auth_header = format!("Basic {}", STANDARD.encode(credentials));

        Self {
            agent: build_agent(Duration::from_secs(10)),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
            retry: RetryPolicy::default(),
            directory,
            max_results: DEFAULT_MAX_RESULTS,
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

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn directory(&self) -> &AliasDirectory {
        &self.directory
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/3{}", self.base_url, path)
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

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // Jira error format: {"errorMessages":["..."], "errors":{...}}
        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            let mut messages = Vec::new();

            if let Some(errors) = error_response
                .get("errorMessages")
                .and_then(|e| e.as_array())
            {
                for e in errors {
                    if let Some(s) = e.as_str() {
                        messages.push(s.to_string());
                    }
                }
            }

            if let Some(errors) = error_response.get("errors").and_then(|e| e.as_object()) {
                for (field, msg) in errors {
                    if let Some(s) = msg.as_str() {
                        messages.push(format!("{}: {}", field, s));
                    }
                }
            }

            if messages.is_empty() {
                body
            } else {
                messages.join("; ")
            }
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        if status == 401 {
            Err(JiraError::Unauthorized)
        } else {
            Err(JiraError::Api { status, message })
        }
    }

    // ==================== Search ====================

    /// Search issues using JQL
    pub fn search_issues(&self, jql: &str, max_results: usize) -> Result<JiraSearchResult> {
        let url = self.api_url("/search/jql");
        let request = JiraSearchRequest {
            jql: jql.to_string(),
            fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
            max_results,
        };

        self.retry
            .run(
                |attempt| -> Result<JiraSearchResult> {
                    debug!(%url, %jql, attempt, "Jira search");
                    let response = self
                        .agent
                        .post(&url)
                        .header("Authorization", &self.auth_header)
                        .header("Content-Type", "application/json")
                        .header("Accept", "application/json")
                        .send_json(&request)
                        .map_err(JiraError::Http)?;

                    let mut response = self.check_response(response)?;
                    let result: JiraSearchResult = response.body_mut().read_json()?;
                    Ok(result)
                },
                JiraError::is_retryable,
            )
            .map_err(|failure| {
                if failure.exhausted {
                    JiraError::RetriesExhausted {
                        attempts: failure.attempts,
                        last: Box::new(failure.error),
                    }
                } else {
                    failure.error
                }
            })
    }

    /// Issues assigned to a Jira account id
    pub fn assigned_to(&self, account_id: &str) -> Result<Vec<JiraIssue>> {
        let jql = assignee_jql(account_id);
        let result = self.search_issues(&jql, self.max_results)?;
        Ok(result.issues)
    }
}

/// JQL selecting issues assigned to `account_id`
pub fn assignee_jql(account_id: &str) -> String {
    let escaped = account_id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("assignee = \"{}\"", escaped)
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        // Don't treat HTTP errors as errors - we'll handle them ourselves
        .http_status_as_error(false)
        .build()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignee_jql_quotes_account_id() {
        assert_eq!(
            assignee_jql("5b10ac8d82e05b22cc7d4ef5"),
            r#"assignee = "5b10ac8d82e05b22cc7d4ef5""#
        );
        assert_eq!(assignee_jql(r#"a"b"#), r#"assignee = "a\"b""#);
    }
}
