//! Unit tests for JiraClient using wiremock

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use activity_core::{
        ActivityError, AliasDirectory, JiraActivity, Person, RetryPolicy, System, TimeWindow,
    };
    use chrono::{Duration as ChronoDuration, Utc};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::JiraClient;

    fn directory() -> Arc<AliasDirectory> {
        Arc::new(AliasDirectory::new([
            Person::new("john", Some("jdoe".into()), Some("acc-john".into())),
            Person::new("mike", Some("mike-dev".into()), None),
        ]))
    }

    fn client(server: &MockServer) -> JiraClient {
        JiraClient::new(&server.uri(), "test@example.com", "test-token", directory())
            .with_retry(RetryPolicy::new(3, Duration::ZERO))
    }

    fn days_ago(days: i64) -> String {
        (Utc::now() - ChronoDuration::days(days))
            .format("%Y-%m-%dT%H:%M:%S%.3f%z")
            .to_string()
    }

    /// Helper to create a mock Jira issue response
    fn mock_jira_issue(key: &str, summary: &str, status: &str, updated: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "10001",
            "key": key,
            "fields": {
                "summary": summary,
                "status": {"id": "1", "name": status},
                "updated": updated
            }
        })
    }

    #[tokio::test]
    async fn test_assigned_issues() {
        let mock_server = MockServer::start().await;

        // Basic auth: base64("test@example.com:test-token")
        Mock::given(method("POST"))
            .and(path("/rest/api/3/search/jql"))
            .and(header(
                "Authorization",
                "Basic dGVzdEBleGFtcGxlLmNvbTp0ZXN0LXRva2Vu",
            ))
            .and(body_json(serde_json::json!({
                "jql": "assignee = \"acc-john\"",
                "fields": ["summary", "status", "updated"],
                "maxResults": 50
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issues": [
                    mock_jira_issue("PROJ-1", "Fix checkout", "In Progress", &days_ago(1)),
                    mock_jira_issue("PROJ-2", "Write docs", "To Do", &days_ago(20))
                ],
                "isLast": true
            })))
            .mount(&mock_server)
            .await;

        let issues = client(&mock_server).assigned_issues("John", None).unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].key, "PROJ-1");
        assert_eq!(issues[0].summary, "Fix checkout");
        assert_eq!(issues[0].status, "In Progress");
        assert_eq!(issues[1].key, "PROJ-2");
    }

    #[tokio::test]
    async fn test_assigned_issues_applies_window() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issues": [
                    mock_jira_issue("PROJ-1", "Fresh", "In Progress", &days_ago(2)),
                    mock_jira_issue("PROJ-2", "Stale", "To Do", &days_ago(45))
                ]
            })))
            .mount(&mock_server)
            .await;

        let issues = client(&mock_server)
            .assigned_issues("john", Some(TimeWindow::days(30)))
            .unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "PROJ-1");
    }

    #[tokio::test]
    async fn test_server_error_exhausts_retries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(502))
            .expect(3)
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .assigned_issues("john", None)
            .unwrap_err();

        assert!(matches!(
            err,
            ActivityError::ServiceUnavailable {
                system: System::Jira,
                attempts: 3,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Jira is temporarily unavailable");
    }

    #[tokio::test]
    async fn test_bad_request_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errorMessages": ["Error in the JQL Query"],
                "errors": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .assigned_issues("john", None)
            .unwrap_err();

        match err {
            ActivityError::Upstream {
                status, message, ..
            } => {
                assert_eq!(status, Some(400));
                assert_eq!(message, "Error in the JQL Query");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .assigned_issues("john", None)
            .unwrap_err();

        assert!(matches!(
            err,
            ActivityError::Upstream {
                status: Some(401),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_person_without_jira_account() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .assigned_issues("mike", None)
            .unwrap_err();

        assert_eq!(err.to_string(), "User 'Mike' not found");
        assert!(err.is_lookup_failure());
    }
}
