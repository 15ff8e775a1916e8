use activity_core::{ActivityError, System};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<JiraError> },
}

impl JiraError {
    /// Only server-side (5xx) responses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, JiraError::Api { status, .. } if (500..600).contains(status))
    }
}

pub type Result<T> = std::result::Result<T, JiraError>;

impl From<JiraError> for ActivityError {
    fn from(err: JiraError) -> Self {
        match err {
            JiraError::RetriesExhausted { attempts, last } => ActivityError::ServiceUnavailable {
                system: System::Jira,
                attempts,
                message: last.to_string(),
            },
            JiraError::Api { status, message } if status >= 500 => {
                ActivityError::ServiceUnavailable {
                    system: System::Jira,
                    attempts: 1,
                    message,
                }
            }
            JiraError::Http(ureq::Error::Json(e)) => ActivityError::Upstream {
                system: System::Jira,
                status: None,
                message: e.to_string(),
            },
            JiraError::Http(e) => ActivityError::ServiceUnavailable {
                system: System::Jira,
                attempts: 1,
                message: e.to_string(),
            },
            JiraError::Api { status, message } => ActivityError::Upstream {
                system: System::Jira,
                status: Some(status),
                message,
            },
            JiraError::Unauthorized => ActivityError::Upstream {
                system: System::Jira,
                status: Some(401),
                message: "Authentication failed".to_string(),
            },
            other @ (JiraError::Parse(_) | JiraError::Timestamp(_)) => ActivityError::Upstream {
                system: System::Jira,
                status: None,
                message: other.to_string(),
            },
        }
    }
}
