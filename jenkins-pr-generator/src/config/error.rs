//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse project file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The project defaults do not name the application.
    #[error("Please set \"application_name\" in your project!")]
    MissingApplicationName,

    /// The project defaults do not fully describe the git repository.
    #[error("Please set git_url, git_org and git_repo in your project.")]
    MissingRepository,

    /// Missing required file.
    #[error("Missing required file: {path}")]
    MissingFile { path: String },
}
