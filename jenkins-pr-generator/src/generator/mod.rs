//! Per pull request job generation and cleanup.
//!
//! The generator takes a snapshot of the open pull requests when it is
//! built. For each of them a job collection can be converted into a variant
//! building that pull request; jobs left over from pull requests that are no
//! longer open are deleted from the job host.

mod error;
mod overrides;

pub use error::GeneratorError;
pub use overrides::{changelog_to_branch_supported, JobOverride};

use crate::config::{JobCollection, ProjectDefaults, ValueMap};
use crate::jenkins::JobHost;
use crate::pull_requests::{PullRequest, PullRequestSource};
use crate::registry::{PluginRegistry, SCM_PLUGIN};
use serde_json::Value;
use tracing::{debug, info, info_span, Instrument};

/// Generates and cleans up jobs for the open pull requests of one application.
#[derive(Debug, Clone)]
pub struct PullRequestGenerator {
    application_name: String,
    open_prs: Vec<PullRequest>,
    debug: bool,
}

impl PullRequestGenerator {
    /// Validates the project defaults and fetches the open pull requests.
    ///
    /// Missing defaults are reported before any network access. In `debug`
    /// mode [`Self::delete_closed_prs`] never touches the job host.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Config`] for incomplete defaults and
    /// [`GeneratorError::Source`] if the pull requests cannot be fetched.
    pub async fn new(defaults: &ValueMap, debug: bool) -> Result<Self, GeneratorError> {
        let project = ProjectDefaults::from_values(defaults)?;
        let source = PullRequestSource::new(project.repository)?;
        Self::from_source(project.application_name, &source, debug).await
    }

    /// Fetches the open pull requests from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Source`] if the pull requests cannot be fetched.
    pub async fn from_source(
        application_name: String,
        source: &PullRequestSource,
        debug: bool,
    ) -> Result<Self, GeneratorError> {
        let open_prs = source.fetch().await?;
        debug!(
            repository = %source.repository().full_name(),
            count = open_prs.len(),
            "Fetched open pull requests"
        );
        Ok(Self::with_open_prs(application_name, open_prs, debug))
    }

    /// Creates a generator from an already known set of open pull requests.
    #[must_use]
    pub fn with_open_prs(
        application_name: impl Into<String>,
        open_prs: Vec<PullRequest>,
        debug: bool,
    ) -> Self {
        Self {
            application_name: application_name.into(),
            open_prs,
            debug,
        }
    }

    /// Returns the application name jobs are derived from.
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Returns the open pull requests captured at construction.
    pub fn open_prs(&self) -> &[PullRequest] {
        &self.open_prs
    }

    /// Returns whether debug mode is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the pattern matching every job generated for a pull request.
    ///
    /// Format: `^{application_name}-PR(\d+)-(.*)$`, with the application
    /// name escaped.
    #[must_use]
    pub fn job_name_pattern(&self) -> String {
        format!(r"^{}-PR(\d+)-(.*)$", regex::escape(&self.application_name))
    }

    /// Turns `collection` into the job variant of `pr`, in place.
    ///
    /// Equivalent to [`Self::convert_defaults`] followed by
    /// [`Self::apply_overrides`] on every job.
    pub fn convert(
        &self,
        collection: &mut JobCollection,
        pr: &PullRequest,
        registry: &dyn PluginRegistry,
    ) {
        debug!(pr = pr.id(), jobs = collection.jobs.len(), "Converting job collection");
        self.convert_defaults(&mut collection.defaults, pr);
        self.apply_overrides(&mut collection.jobs, pr, registry);
    }

    /// Points the collection defaults at `pr`.
    ///
    /// `application_name` becomes `{application_name}-PR{id}` and
    /// `pull_request_number` is set to the pull request id.
    pub fn convert_defaults(&self, defaults: &mut ValueMap, pr: &PullRequest) {
        defaults.insert(
            "application_name".to_string(),
            Value::String(pr.job_name(&self.application_name)),
        );
        defaults.insert(
            "pull_request_number".to_string(),
            Value::String(pr.id().to_string()),
        );
    }

    /// Writes the SCM overrides of [`JobOverride`] into every job.
    ///
    /// The values are written verbatim, so this runs after template
    /// rendering: branch names may contain `{{`. The changelog restriction
    /// is only written when the installed SCM plugin supports it.
    pub fn apply_overrides(
        &self,
        jobs: &mut [ValueMap],
        pr: &PullRequest,
        registry: &dyn PluginRegistry,
    ) {
        let scm_version = registry.installed_version(SCM_PLUGIN);
        let changelog_to_branch = changelog_to_branch_supported(scm_version.as_ref());
        let job_override = JobOverride::for_pull_request(pr);

        for job in jobs {
            job_override.apply(job, changelog_to_branch);
        }
    }

    /// Deletes generated jobs whose pull request is no longer open.
    ///
    /// Candidates are the jobs matching [`Self::job_name_pattern`]; a job is
    /// kept if its name starts with `{application_name}-PR{id}` for any open
    /// pull request. Deletions run one at a time and stop at the first
    /// failure. Does nothing in debug mode.
    ///
    /// # Returns
    ///
    /// The names of the deleted jobs.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Jenkins`] if listing or deleting fails.
    pub async fn delete_closed_prs(
        &self,
        host: &dyn JobHost,
    ) -> Result<Vec<String>, GeneratorError> {
        if self.debug {
            info!("Debug mode enabled, not deleting closed pull request jobs");
            return Ok(Vec::new());
        }

        let span = info_span!("delete_closed_prs", application = %self.application_name);

        async {
            let mut jobs = host.list(&self.job_name_pattern()).await?;

            for pr in &self.open_prs {
                let prefix = pr.job_name(&self.application_name);
                jobs.retain(|job| !job.starts_with(&prefix));
            }

            if jobs.is_empty() {
                info!("No closed pull request jobs to delete");
                return Ok(jobs);
            }

            info!(count = jobs.len(), "Deleting closed pull request jobs");
            for job in &jobs {
                host.delete(job).await?;
            }

            Ok(jobs)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jenkins::JenkinsError;
    use crate::registry::{InstalledPlugins, PluginVersion};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Job host recording every call.
    #[derive(Default)]
    struct RecordingHost {
        jobs: Vec<String>,
        listed: Mutex<Vec<String>>,
        deleted: Mutex<Vec<String>>,
    }

    impl RecordingHost {
        fn with_jobs(jobs: &[&str]) -> Self {
            Self {
                jobs: jobs.iter().map(|j| j.to_string()).collect(),
                ..Default::default()
            }
        }

        fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }

        fn listed(&self) -> Vec<String> {
            self.listed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JobHost for RecordingHost {
        async fn list(&self, pattern: &str) -> Result<Vec<String>, JenkinsError> {
            self.listed.lock().unwrap().push(pattern.to_string());
            let regex = regex::Regex::new(pattern).unwrap();
            Ok(self
                .jobs
                .iter()
                .filter(|j| regex.is_match(j))
                .cloned()
                .collect())
        }

        async fn delete(&self, name: &str) -> Result<(), JenkinsError> {
            self.deleted.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    /// Job host whose `delete` fails on the given call (1-based).
    struct FailingHost {
        inner: RecordingHost,
        fail_list: bool,
        fail_on_delete: usize,
    }

    #[async_trait]
    impl JobHost for FailingHost {
        async fn list(&self, pattern: &str) -> Result<Vec<String>, JenkinsError> {
            if self.fail_list {
                return Err(JenkinsError::InvalidUrl {
                    url: "http://jenkins".to_string(),
                    message: "unreachable".to_string(),
                });
            }
            self.inner.list(pattern).await
        }

        async fn delete(&self, name: &str) -> Result<(), JenkinsError> {
            if self.inner.deleted().len() + 1 == self.fail_on_delete {
                return Err(JenkinsError::InvalidUrl {
                    url: format!("http://jenkins/job/{name}/doDelete"),
                    message: "delete refused".to_string(),
                });
            }
            self.inner.delete(name).await
        }
    }

    fn collection() -> JobCollection {
        JobCollection {
            defaults: json!({ "application_name": "svc" })
                .as_object()
                .unwrap()
                .clone(),
            jobs: vec![
                json!({ "name": "{{application_name}}-build" })
                    .as_object()
                    .unwrap()
                    .clone(),
                json!({ "name": "{{application_name}}-deploy", "scm_params": { "wipe_workspace": true } })
                    .as_object()
                    .unwrap()
                    .clone(),
            ],
        }
    }

    fn scm_registry(version: &str) -> InstalledPlugins {
        InstalledPlugins::new().with(SCM_PLUGIN, version.parse::<PluginVersion>().unwrap())
    }

    #[test]
    fn converts_numbered_pull_request() {
        let generator = PullRequestGenerator::with_open_prs("svc", vec![], false);
        let mut jobs = collection();

        generator.convert(&mut jobs, &PullRequest::Numbered(42), &InstalledPlugins::new());

        assert_eq!(jobs.defaults["application_name"], "svc-PR42");
        assert_eq!(jobs.defaults["pull_request_number"], "42");
        for job in &jobs.jobs {
            assert_eq!(job["scm_branch"], "origin/pr/42/head");
            assert_eq!(
                job["scm_params"]["refspec"],
                "refs/pull/42/head:refs/remotes/origin/pr/42/head"
            );
        }
        assert_eq!(jobs.jobs[1]["scm_params"]["wipe_workspace"], true);
    }

    #[test]
    fn converts_branched_pull_request() {
        let generator = PullRequestGenerator::with_open_prs("svc", vec![], false);
        let mut jobs = collection();
        let pr = PullRequest::Branched {
            id: 7,
            branch: "feature-x".to_string(),
        };

        generator.convert(&mut jobs, &pr, &scm_registry("3.0"));

        assert_eq!(jobs.defaults["application_name"], "svc-PR7");
        assert_eq!(jobs.defaults["pull_request_number"], "7");
        for job in &jobs.jobs {
            assert_eq!(job["scm_branch"], "feature-x");
            assert_eq!(job["scm_params"]["refspec"], "");
            assert_eq!(
                job["scm_params"]["changelog_to_branch"],
                json!({ "remote": "origin", "branch": "feature-x" })
            );
        }
    }

    #[test]
    fn changelog_follows_installed_scm_version() {
        let generator = PullRequestGenerator::with_open_prs("svc", vec![], false);

        for (version, expected) in [("1.9", false), ("2.0", false), ("2.0.1", true), ("4.11.3", true)] {
            let mut jobs = collection();
            generator.convert(&mut jobs, &PullRequest::Numbered(1), &scm_registry(version));

            for job in &jobs.jobs {
                assert_eq!(
                    job["scm_params"].get("changelog_to_branch").is_some(),
                    expected,
                    "scm plugin version {version}"
                );
            }
        }

        let mut jobs = collection();
        generator.convert(&mut jobs, &PullRequest::Numbered(1), &scm_registry("2.1"));
        assert_eq!(
            jobs.jobs[0]["scm_params"]["changelog_to_branch"],
            json!({ "remote": "origin", "branch": "pr/1/head" })
        );
    }

    #[test]
    fn job_name_pattern_escapes_application_name() {
        let generator = PullRequestGenerator::with_open_prs("svc.api", vec![], false);
        assert_eq!(generator.job_name_pattern(), r"^svc\.api-PR(\d+)-(.*)$");
    }

    #[tokio::test]
    async fn deletes_only_jobs_of_closed_pull_requests() {
        let generator = PullRequestGenerator::with_open_prs(
            "app",
            vec![PullRequest::Numbered(10), PullRequest::Numbered(11)],
            false,
        );
        let host = RecordingHost::with_jobs(&["app-PR10-x", "app-PR11-y", "app-PR12-z", "app-build"]);

        let deleted = generator.delete_closed_prs(&host).await.unwrap();

        assert_eq!(deleted, vec!["app-PR12-z".to_string()]);
        assert_eq!(host.deleted(), vec!["app-PR12-z".to_string()]);
        assert_eq!(host.listed(), vec![r"^app-PR(\d+)-(.*)$".to_string()]);
    }

    #[tokio::test]
    async fn branched_pull_requests_protect_their_jobs() {
        let generator = PullRequestGenerator::with_open_prs(
            "app",
            vec![PullRequest::Branched {
                id: 3,
                branch: "feature".to_string(),
            }],
            false,
        );
        let host = RecordingHost::with_jobs(&["app-PR3-build", "app-PR4-build"]);

        let deleted = generator.delete_closed_prs(&host).await.unwrap();
        assert_eq!(deleted, vec!["app-PR4-build".to_string()]);
    }

    #[tokio::test]
    async fn open_pull_request_prefix_also_keeps_longer_ids() {
        let generator =
            PullRequestGenerator::with_open_prs("app", vec![PullRequest::Numbered(1)], false);
        let host = RecordingHost::with_jobs(&["app-PR1-build", "app-PR12-build", "app-PR2-build"]);

        let deleted = generator.delete_closed_prs(&host).await.unwrap();

        assert_eq!(deleted, vec!["app-PR2-build".to_string()]);
    }

    #[tokio::test]
    async fn failed_delete_stops_without_rollback() {
        let generator = PullRequestGenerator::with_open_prs("app", vec![], false);
        let host = FailingHost {
            inner: RecordingHost::with_jobs(&["app-PR1-a", "app-PR2-b", "app-PR3-c"]),
            fail_list: false,
            fail_on_delete: 2,
        };

        let result = generator.delete_closed_prs(&host).await;

        assert!(matches!(
            result,
            Err(GeneratorError::Jenkins(JenkinsError::InvalidUrl { ref url, .. }))
                if url.ends_with("app-PR2-b/doDelete")
        ));
        assert_eq!(host.inner.deleted(), vec!["app-PR1-a".to_string()]);
    }

    #[tokio::test]
    async fn failed_listing_deletes_nothing() {
        let generator = PullRequestGenerator::with_open_prs("app", vec![], false);
        let host = FailingHost {
            inner: RecordingHost::with_jobs(&["app-PR1-a"]),
            fail_list: true,
            fail_on_delete: 0,
        };

        let result = generator.delete_closed_prs(&host).await;

        assert!(matches!(result, Err(GeneratorError::Jenkins(_))));
        assert!(host.inner.deleted().is_empty());
    }

    #[test]
    fn overrides_are_written_verbatim() {
        let generator = PullRequestGenerator::with_open_prs("svc", vec![], false);
        let mut jobs = collection().jobs;
        let pr = PullRequest::Branched {
            id: 7,
            branch: "fix-{{git_org}}".to_string(),
        };

        generator.apply_overrides(&mut jobs, &pr, &scm_registry("3.0"));

        assert_eq!(jobs[0]["scm_branch"], "fix-{{git_org}}");
        assert_eq!(
            jobs[0]["scm_params"]["changelog_to_branch"]["branch"],
            "fix-{{git_org}}"
        );
    }

    #[tokio::test]
    async fn debug_mode_never_touches_job_host() {
        let generator =
            PullRequestGenerator::with_open_prs("app", vec![PullRequest::Numbered(10)], true);
        let host = RecordingHost::with_jobs(&["app-PR12-z"]);

        let deleted = generator.delete_closed_prs(&host).await.unwrap();

        assert!(deleted.is_empty());
        assert!(host.listed().is_empty());
        assert!(host.deleted().is_empty());
    }

    #[tokio::test]
    async fn missing_defaults_fail_before_fetching() {
        let defaults = json!({
            "application_name": "svc",
            "git_url": "https://github.com",
            "git_org": "acme"
        });

        let result = PullRequestGenerator::new(defaults.as_object().unwrap(), false).await;

        assert!(matches!(
            result,
            Err(GeneratorError::Config(
                crate::config::ConfigError::MissingRepository
            ))
        ));
    }
}
