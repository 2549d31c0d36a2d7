//! Jenkins client error types.

use thiserror::Error;

/// Errors that can occur while talking to a Jenkins server.
#[derive(Debug, Error)]
pub enum JenkinsError {
    /// The HTTP request failed or returned a non-success status.
    #[error("Jenkins request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The job name pattern is not a valid regular expression.
    #[error("Invalid job name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The server URL cannot address jobs.
    #[error("Invalid Jenkins URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
