//! Project configuration loading.
//!
//! A project file holds a shared `defaults` table and a list of job
//! templates. The defaults must name the application and the git repository
//! whose pull requests are turned into jobs.

mod defaults;
mod error;
mod project;

pub use defaults::{GitRepository, ProjectDefaults};
pub use error::ConfigError;
pub use project::{JobCollection, ValueMap};

/// Default name of the project file.
pub const DEFAULT_PROJECT_FILE: &str = "project.toml";
