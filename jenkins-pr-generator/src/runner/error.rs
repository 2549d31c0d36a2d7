//! Runner error types.

use std::path::PathBuf;

/// Errors that can occur while running the generator.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Project loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Pull request lookup and cleanup errors.
    #[error(transparent)]
    Generator(#[from] crate::generator::GeneratorError),

    /// Jenkins client initialization errors.
    #[error(transparent)]
    Jenkins(#[from] crate::jenkins::JenkinsError),

    /// Job values could not be rendered.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// A materialized job collection could not be serialized.
    #[error("Failed to serialize job collection: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An output file could not be written.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
