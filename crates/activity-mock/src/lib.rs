//! Fixture-backed activity clients
//!
//! This crate provides an implementation of the `GitHubActivity` and
//! `JiraActivity` traits that answers from a `scenario.toml` file instead of
//! making HTTP requests. It's designed for:
//!
//! 1. **Offline runs**: exercise the chatbot without GitHub/Jira credentials
//! 2. **Integration Testing**: deterministic answers for CLI and endpoint tests
//! 3. **Outage drills**: mark a system as unavailable and watch the replies
//!
//! # Usage
//!
//! Set the `TEAM_ACTIVITY_MOCK_DIR` environment variable to point to a scenario directory:
//!
//! ```bash
//! TEAM_ACTIVITY_MOCK_DIR=./fixtures/basic team-activity ask "what did john commit?"
//! ```
//!
//! # Scenario Structure
//!
//! ```toml
//! # Systems that answer as if down
//! unavailable = ["jira"]
//!
//! [scenario]
//! name = "basic"
//!
//! [[commits]]
//! alias = "john"
//! repo = "acme/api"
//! message = "Fix login redirect"
//! days_ago = 1
//!
//! [[jira_issues]]
//! alias = "john"
//! key = "PROJ-1"
//! summary = "Fix checkout"
//! status = "In Progress"
//! date = "2024-01-15T10:30:00Z"
//! ```

mod client;
mod scenario;

pub use client::{CallLogEntry, MockClient};
pub use scenario::{
    FixtureCommit, FixtureIssue, FixturePullRequest, Scenario, ScenarioError, ScenarioMeta,
};

/// Environment variable to enable mock mode
pub const MOCK_DIR_ENV: &str = "TEAM_ACTIVITY_MOCK_DIR";

/// File name of the scenario inside the mock directory
pub const SCENARIO_FILE: &str = "scenario.toml";

/// Get the mock directory from environment, if set
pub fn get_mock_dir() -> Option<std::path::PathBuf> {
    std::env::var_os(MOCK_DIR_ENV).map(std::path::PathBuf::from)
}
