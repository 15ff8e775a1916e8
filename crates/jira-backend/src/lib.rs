pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;

#[cfg(test)]
mod client_tests;

pub use client::JiraClient;
pub use error::{JiraError, Result};
pub use models::*;

// Re-export activity-core types for convenience
pub use activity_core::{ActivityError, JiraActivity};
