pub mod directory;
pub mod error;
pub mod models;
pub mod retry;
pub mod traits;
pub mod window;

pub use directory::{AliasDirectory, Person};
pub use error::{ActivityError, Result, System, UnsupportedIntent};
pub use models::*;
pub use retry::{RetryFailure, RetryPolicy};
pub use traits::{GitHubActivity, JiraActivity};
pub use window::{retain_within, TimeWindow};
