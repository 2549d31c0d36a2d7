//! Generator error types.

use crate::config::ConfigError;
use crate::jenkins::JenkinsError;
use crate::pull_requests::SourceError;

/// Errors that can occur while generating or cleaning up pull request jobs.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Project defaults are incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Open pull requests could not be fetched.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The job host rejected a list or delete request.
    #[error(transparent)]
    Jenkins(#[from] JenkinsError),
}
