//! Implementation of activity-core traits for JiraClient

use activity_core::{AssignedIssue, JiraActivity, Result, System, TimeWindow, retain_within};
use chrono::Utc;
use tracing::info;

use crate::client::JiraClient;

impl JiraActivity for JiraClient {
    fn assigned_issues(
        &self,
        alias: &str,
        window: Option<TimeWindow>,
    ) -> Result<Vec<AssignedIssue>> {
        let account_id = self
            .directory()
            .resolve(alias, System::Jira)?
            .to_string();

        let issues = self
            .assigned_to(&account_id)?
            .into_iter()
            .map(AssignedIssue::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let issues = retain_within(issues, window, Utc::now(), |i| i.updated);

        info!(%account_id, count = issues.len(), "fetched assigned Jira issues");
        Ok(issues)
    }
}
