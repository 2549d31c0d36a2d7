//! Runner configuration.

use crate::jenkins::JenkinsCredentials;
use crate::registry::PluginVersion;
use std::path::{Path, PathBuf};

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the project file.
    project_path: PathBuf,
    /// Directory receiving one materialized job collection per pull request.
    output_dir: PathBuf,
    /// Whether to leave the job host untouched.
    debug: bool,
    /// Base URL of the Jenkins server, if any.
    jenkins_url: Option<String>,
    /// Credentials for the Jenkins server.
    jenkins_credentials: Option<JenkinsCredentials>,
    /// SCM plugin version to assume instead of asking Jenkins.
    scm_version: Option<PluginVersion>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(project_path: PathBuf, output_dir: PathBuf, debug: bool) -> Self {
        Self {
            project_path,
            output_dir,
            debug,
            jenkins_url: None,
            jenkins_credentials: None,
            scm_version: None,
        }
    }

    /// Sets the Jenkins server used for plugin lookup and job cleanup.
    pub fn with_jenkins(
        mut self,
        jenkins_url: String,
        jenkins_credentials: Option<JenkinsCredentials>,
    ) -> Self {
        self.jenkins_url = Some(jenkins_url);
        self.jenkins_credentials = jenkins_credentials;
        self
    }

    /// Sets the SCM plugin version to assume.
    pub fn with_scm_version(mut self, scm_version: PluginVersion) -> Self {
        self.scm_version = Some(scm_version);
        self
    }

    /// Returns the project file path.
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns whether debug mode is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the Jenkins server URL.
    pub fn jenkins_url(&self) -> Option<&str> {
        self.jenkins_url.as_deref()
    }

    /// Returns the Jenkins credentials.
    pub fn jenkins_credentials(&self) -> Option<&JenkinsCredentials> {
        self.jenkins_credentials.as_ref()
    }

    /// Returns the assumed SCM plugin version.
    pub fn scm_version(&self) -> Option<&PluginVersion> {
        self.scm_version.as_ref()
    }
}
