//! Job collection loading from project files.

use super::{ConfigError, ProjectDefaults};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Free-form value map used for defaults and job definitions.
pub type ValueMap = serde_json::Map<String, Value>;

/// A set of job templates sharing one defaults table.
///
/// Loaded from a project file of the form:
/// ```toml
/// [defaults]
/// application_name = "svc"
/// git_url = "https://github.com"
/// git_org = "acme"
/// git_repo = "svc"
///
/// [[jobs]]
/// name = "{{application_name}}-build"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCollection {
    /// Values shared by every job in the collection.
    #[serde(default)]
    pub defaults: ValueMap,

    /// Job definitions, in declaration order.
    #[serde(default)]
    pub jobs: Vec<ValueMap>,
}

impl JobCollection {
    /// Loads a job collection from a TOML project file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading project file");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses a job collection from TOML content.
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlError`] if the content is not valid TOML
    /// or does not have the expected shape.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let collection: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.display().to_string(),
            source: e,
        })?;

        if collection.jobs.is_empty() {
            warn!(path = %origin.display(), "Project file defines no jobs");
        }

        Ok(collection)
    }

    /// Validates and returns the required project defaults.
    ///
    /// # Errors
    ///
    /// See [`ProjectDefaults::from_values`].
    pub fn project_defaults(&self) -> Result<ProjectDefaults, ConfigError> {
        ProjectDefaults::from_values(&self.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PROJECT: &str = r#"
[defaults]
application_name = "svc"
git_url = "https://github.com"
git_org = "acme"
git_repo = "svc"

[[jobs]]
name = "{{application_name}}-build"

[jobs.scm_params]
wipe_workspace = true

[[jobs]]
name = "{{application_name}}-deploy"
"#;

    #[test]
    fn load_project_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("project.toml");
        fs::write(&path, PROJECT).unwrap();

        let collection = JobCollection::load(&path).unwrap();

        assert_eq!(collection.jobs.len(), 2);
        assert_eq!(collection.jobs[0]["name"], "{{application_name}}-build");
        assert_eq!(collection.jobs[0]["scm_params"]["wipe_workspace"], true);
        assert_eq!(collection.jobs[1]["name"], "{{application_name}}-deploy");

        let defaults = collection.project_defaults().unwrap();
        assert_eq!(defaults.application_name, "svc");
    }

    #[test]
    fn load_missing_project_file() {
        let temp = TempDir::new().unwrap();

        let result = JobCollection::load(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn parse_rejects_invalid_toml() {
        let result = JobCollection::parse("[defaults\nname = ", Path::new("broken.toml"));
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn parse_accepts_collection_without_jobs() {
        let collection = JobCollection::parse(
            "[defaults]\napplication_name = \"svc\"\n",
            Path::new("empty.toml"),
        )
        .unwrap();

        assert!(collection.jobs.is_empty());
        assert_eq!(collection.defaults["application_name"], "svc");
    }
}
