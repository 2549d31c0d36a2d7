//! Orchestrates pull request job generation runs.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::JobCollection;
use crate::generator::PullRequestGenerator;
use crate::jenkins::JenkinsClient;
use crate::parameters::annotate_parameter_classes;
use crate::pull_requests::PullRequest;
use crate::registry::{InstalledPlugins, PluginRegistry, SCM_PLUGIN};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::JobRenderer;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Runs generation and cleanup for one project.
pub struct Runner {
    config: RunnerConfig,
    jenkins: Option<JenkinsClient>,
    renderer: JobRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let jenkins = config
            .jenkins_url()
            .map(|url| JenkinsClient::new(url, config.jenkins_credentials().cloned()))
            .transpose()?;

        Ok(Self {
            config,
            jenkins,
            renderer: JobRenderer::new(),
        })
    }

    /// Executes the full flow: load the project, fetch open pull requests,
    /// write one job collection per pull request, delete jobs of closed ones.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.debug());

        info!(path = %self.config.project_path().display(), "Loading project");
        let collection = JobCollection::load(self.config.project_path())?;
        let generator = PullRequestGenerator::new(&collection.defaults, self.config.debug()).await?;

        summary.open_prs = generator.open_prs().len();
        info!(
            application = generator.application_name(),
            count = summary.open_prs,
            "Found open pull requests"
        );

        let registry = self.plugin_registry().await;
        create_output_dir(self.config.output_dir())?;

        for pr in generator.open_prs() {
            if let Some(branch) = pr.branch() {
                debug!(pr = pr.id(), branch, "Using source branch");
            }
            let result = match self.materialize(&generator, &collection, pr, &registry) {
                Ok((path, jobs)) => {
                    info!(pr = pr.id(), path = %path.display(), jobs, "Wrote pull request jobs");
                    ProcessingResult::Generated {
                        pull_request: pr.id(),
                        path,
                        jobs,
                    }
                }
                Err(e) => {
                    error!(pr = pr.id(), error = %e, "Failed to generate pull request jobs");
                    ProcessingResult::Failed {
                        pull_request: pr.id(),
                        error: e.to_string(),
                    }
                }
            };
            summary.record_result(&result);
        }

        match &self.jenkins {
            Some(jenkins) => {
                info!(server = jenkins.server_url(), "Cleaning up closed pull request jobs");
                summary.jobs_deleted = generator.delete_closed_prs(jenkins).await?;
            }
            None if !self.config.debug() => {
                warn!("No Jenkins URL configured, skipping cleanup of closed pull request jobs");
            }
            None => {}
        }

        Ok(summary)
    }

    /// Resolves installed plugin versions, preferring the configured SCM version.
    ///
    /// A Jenkins lookup failure is logged and yields an empty registry, which
    /// disables version-gated options.
    async fn plugin_registry(&self) -> InstalledPlugins {
        if let Some(version) = self.config.scm_version() {
            info!(version = %version, "Using configured SCM plugin version");
            return InstalledPlugins::new().with(SCM_PLUGIN, version.clone());
        }

        let Some(jenkins) = &self.jenkins else {
            return InstalledPlugins::new();
        };

        match jenkins.installed_plugins().await {
            Ok(plugins) => {
                if let Some(version) = plugins.installed_version(SCM_PLUGIN) {
                    info!(version = %version, "Detected SCM plugin version");
                }
                plugins
            }
            Err(e) => {
                warn!(error = %e, "Failed to load installed plugins");
                InstalledPlugins::new()
            }
        }
    }

    /// Converts a copy of `collection` for `pr` and writes it to the output directory.
    ///
    /// Templates are rendered before the SCM overrides are applied, so branch
    /// names reach the output unrendered.
    fn materialize(
        &self,
        generator: &PullRequestGenerator,
        collection: &JobCollection,
        pr: &PullRequest,
        registry: &dyn PluginRegistry,
    ) -> Result<(PathBuf, usize), RunnerError> {
        let mut converted = collection.clone();
        generator.convert_defaults(&mut converted.defaults, pr);

        let mut jobs = self.renderer.render_collection(&converted)?;
        generator.apply_overrides(&mut jobs, pr, registry);
        for job in &mut jobs {
            annotate_parameter_classes(job);
        }

        let output = JobCollection {
            defaults: converted.defaults,
            jobs,
        };
        let path = self
            .config
            .output_dir()
            .join(format!("{}.json", pr.job_name(generator.application_name())));
        let content = serde_json::to_string_pretty(&output)?;

        std::fs::write(&path, content).map_err(|e| RunnerError::Io {
            path: path.clone(),
            source: e,
        })?;

        Ok((path, output.jobs.len()))
    }
}

fn create_output_dir(path: &Path) -> Result<(), RunnerError> {
    std::fs::create_dir_all(path).map_err(|e| RunnerError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
