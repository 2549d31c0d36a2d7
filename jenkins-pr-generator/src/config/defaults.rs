//! Required project defaults.

use super::{ConfigError, ValueMap};
use serde_json::Value;

/// Coordinates of the repository whose pull requests drive job generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepository {
    /// Base URL of the hosting service (e.g. `https://github.com`).
    pub url: String,

    /// Organization, user or workspace owning the repository.
    pub org: String,

    /// Repository name or slug.
    pub repo: String,
}

impl GitRepository {
    /// Creates repository coordinates, rejecting empty parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRepository`] if any part is blank.
    pub fn new(url: &str, org: &str, repo: &str) -> Result<Self, ConfigError> {
        let (url, org, repo) = (url.trim(), org.trim(), repo.trim());
        if url.is_empty() || org.is_empty() || repo.is_empty() {
            return Err(ConfigError::MissingRepository);
        }

        Ok(Self {
            url: url.to_string(),
            org: org.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Returns the repository in "org/repo" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

/// Validated subset of a project's `defaults` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefaults {
    /// Base name for every generated job.
    pub application_name: String,

    /// Repository to query for open pull requests.
    pub repository: GitRepository,
}

impl ProjectDefaults {
    /// Extracts and validates the required keys from a defaults value map.
    ///
    /// `application_name` is checked first, then `git_url`, `git_org` and
    /// `git_repo` together.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApplicationName`] or
    /// [`ConfigError::MissingRepository`] when a key is absent, blank or not
    /// a string.
    pub fn from_values(values: &ValueMap) -> Result<Self, ConfigError> {
        let application_name =
            string_value(values, "application_name").ok_or(ConfigError::MissingApplicationName)?;

        let repository = GitRepository::new(
            string_value(values, "git_url").unwrap_or_default(),
            string_value(values, "git_org").unwrap_or_default(),
            string_value(values, "git_repo").unwrap_or_default(),
        )?;

        Ok(Self {
            application_name: application_name.to_string(),
            repository,
        })
    }
}

fn string_value<'a>(values: &'a ValueMap, key: &str) -> Option<&'a str> {
    values
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
