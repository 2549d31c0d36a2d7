//! Pull request lookup error types.

use super::HostKind;
use thiserror::Error;

/// Errors that can occur while fetching open pull requests.
///
/// Transport, status and decoding failures all collapse into
/// [`SourceError::ConnectionFailed`]; the underlying cause is only logged.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The hosting service could not be queried.
    #[error("Failed connecting to {host}!")]
    ConnectionFailed { host: HostKind },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
