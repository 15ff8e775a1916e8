//! Model conversions from Jira types to activity-core records

use activity_core::AssignedIssue;
use chrono::{DateTime, Utc};

use crate::error::{JiraError, Result};
use crate::models::*;

/// Parse a Jira timestamp.
///
/// Jira Cloud sends "2024-01-15T10:30:00.000+0000" (no colon in the offset);
/// RFC 3339 is accepted as well.
pub fn parse_jira_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| JiraError::Timestamp(s.to_string()))
}

impl TryFrom<JiraIssue> for AssignedIssue {
    type Error = JiraError;

    fn try_from(issue: JiraIssue) -> Result<Self> {
        let updated = parse_jira_datetime(&issue.fields.updated)?;
        Ok(AssignedIssue {
            key: issue.key,
            summary: issue.fields.summary,
            status: issue.fields.status.name,
            updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jira_datetime_formats() {
        let dt = parse_jira_datetime("2024-01-15T10:30:00.000+0000").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:00+00:00");

        let dt = parse_jira_datetime("2024-01-15T12:30:00.000+0200").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:00+00:00");

        let dt = parse_jira_datetime("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:00+00:00");

        assert!(parse_jira_datetime("last tuesday").is_err());
    }

    #[test]
    fn test_issue_conversion() {
        let issue: JiraIssue = serde_json::from_value(serde_json::json!({
            "id": "10001",
            "key": "PROJ-7",
            "fields": {
                "summary": "Fix checkout",
                "status": {"id": "3", "name": "In Progress"},
                "updated": "2024-01-15T10:30:00.000+0000"
            }
        }))
        .unwrap();

        let record = AssignedIssue::try_from(issue).unwrap();
        assert_eq!(record.key, "PROJ-7");
        assert_eq!(record.summary, "Fix checkout");
        assert_eq!(record.status, "In Progress");
    }
}
