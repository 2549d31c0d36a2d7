//! Jenkins job host access.
//!
//! [`JobHost`] is the narrow interface the generator needs to clean up jobs;
//! [`JenkinsClient`] implements it against the Jenkins JSON API.

mod client;
mod error;
mod types;

pub use client::{JenkinsClient, JenkinsCredentials};
pub use error::JenkinsError;

use async_trait::async_trait;

/// A server hosting named jobs.
#[async_trait]
pub trait JobHost: Send + Sync {
    /// Lists the names of all jobs matching the regular expression `pattern`.
    async fn list(&self, pattern: &str) -> Result<Vec<String>, JenkinsError>;

    /// Deletes the job called `name`.
    async fn delete(&self, name: &str) -> Result<(), JenkinsError>;
}
