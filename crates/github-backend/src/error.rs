use activity_core::{ActivityError, System};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<GitHubError>,
    },
}

impl GitHubError {
    /// Only server-side (5xx) responses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, GitHubError::Api { status, .. } if (500..600).contains(status))
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for ActivityError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::RetriesExhausted { attempts, last } => ActivityError::ServiceUnavailable {
                system: System::GitHub,
                attempts,
                message: last.to_string(),
            },
            GitHubError::Api { status, message } if status >= 500 => {
                ActivityError::ServiceUnavailable {
                    system: System::GitHub,
                    attempts: 1,
                    message,
                }
            }
            GitHubError::Http(ureq::Error::Json(e)) => ActivityError::Upstream {
                system: System::GitHub,
                status: None,
                message: e.to_string(),
            },
            GitHubError::Http(e) => ActivityError::ServiceUnavailable {
                system: System::GitHub,
                attempts: 1,
                message: e.to_string(),
            },
            GitHubError::Api { status, message } => ActivityError::Upstream {
                system: System::GitHub,
                status: Some(status),
                message,
            },
            GitHubError::RateLimited => ActivityError::Upstream {
                system: System::GitHub,
                status: Some(403),
                message: "GitHub API rate limit exceeded".to_string(),
            },
            GitHubError::Unauthorized => ActivityError::Upstream {
                system: System::GitHub,
                status: Some(401),
                message: "Authentication failed".to_string(),
            },
            other @ (GitHubError::Parse(_) | GitHubError::Timestamp(_)) => {
                ActivityError::Upstream {
                    system: System::GitHub,
                    status: None,
                    message: other.to_string(),
                }
            }
        }
    }
}
