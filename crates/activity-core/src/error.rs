use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remote system a request was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    GitHub,
    Jira,
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            System::GitHub => f.write_str("GitHub"),
            System::Jira => f.write_str("Jira"),
        }
    }
}

/// Common errors for all activity backends
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The alias is not in the directory, or has no identity on `system`
    #[error("User '{alias}' not found")]
    PersonNotFound { alias: String, system: System },

    /// Retries exhausted on server errors, or the service could not be reached
    #[error("{system} is temporarily unavailable")]
    ServiceUnavailable {
        system: System,
        attempts: u32,
        message: String,
    },

    /// The service answered with a client error or an unreadable body
    #[error("{system} rejected the request: {message}")]
    Upstream {
        system: System,
        status: Option<u16>,
        message: String,
    },
}

impl ActivityError {
    pub fn person_not_found(alias: &str, system: System) -> Self {
        ActivityError::PersonNotFound {
            alias: alias.to_string(),
            system,
        }
    }

    /// The remote system involved in this failure
    pub fn system(&self) -> System {
        match self {
            ActivityError::PersonNotFound { system, .. }
            | ActivityError::ServiceUnavailable { system, .. }
            | ActivityError::Upstream { system, .. } => *system,
        }
    }

    /// Whether the failure was detected before reaching the remote system
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, ActivityError::PersonNotFound { .. })
    }
}

/// An intent name outside the closed set of supported intents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported intent: {0}")]
pub struct UnsupportedIntent(pub String);

pub type Result<T> = std::result::Result<T, ActivityError>;
