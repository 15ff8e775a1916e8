//! Implementation of activity-core traits for GitHubClient

use activity_core::{
    ActivityError, ActivitySummary, Commit, GitHubActivity, PullRequest, Repository, Result,
    System, TimeWindow, retain_within,
};
use chrono::Utc;
use std::thread;
use tracing::info;

use crate::client::{GitHubClient, REPOSITORY_SEARCH_PAGE};
use crate::convert::distinct_repositories;

impl GitHubClient {
    fn username(&self, alias: &str) -> Result<String> {
        self.directory()
            .resolve(alias, System::GitHub)
            .map(str::to_string)
    }
}

impl GitHubActivity for GitHubClient {
    fn recent_commits(&self, alias: &str, window: Option<TimeWindow>) -> Result<Vec<Commit>> {
        let username = self.username(alias)?;
        let result = self.search_commits(&username, self.commit_limit())?;

        let commits = result
            .items
            .into_iter()
            .map(Commit::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let commits = retain_within(commits, window, Utc::now(), |c| c.date);

        info!(%username, count = commits.len(), "fetched recent commits");
        Ok(commits)
    }

    fn open_pull_requests(&self, alias: &str) -> Result<Vec<PullRequest>> {
        let username = self.username(alias)?;
        let result = self.search_open_pull_requests(&username)?;

        let prs: Vec<PullRequest> = result
            .items
            .into_iter()
            .filter(|i| i.is_pull_request())
            .map(PullRequest::from)
            .collect();

        info!(%username, count = prs.len(), "fetched open pull requests");
        Ok(prs)
    }

    fn recent_repositories(&self, alias: &str) -> Result<Vec<Repository>> {
        let username = self.username(alias)?;
        let result = self.search_commits(&username, REPOSITORY_SEARCH_PAGE)?;
        let repos = distinct_repositories(&result.items, self.repository_limit());

        info!(%username, count = repos.len(), "fetched recent repositories");
        Ok(repos)
    }

    fn activity_summary(&self, alias: &str) -> Result<ActivitySummary> {
        let username = self.username(alias)?;

        let (commits, pull_requests) = thread::scope(|scope| {
            let commits = scope.spawn(|| self.count_commits(&username));
            let pull_requests = self.count_open_pull_requests(&username);
            let commits = match commits.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            (commits, pull_requests)
        });

        let summary = ActivitySummary {
            commits: commits.map_err(ActivityError::from)?,
            pull_requests: pull_requests.map_err(ActivityError::from)?,
        };
        info!(
            %username,
            commits = summary.commits,
            pull_requests = summary.pull_requests,
            "fetched activity summary"
        );
        Ok(summary)
    }
}
