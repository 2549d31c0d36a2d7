#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod generator;
pub mod jenkins;
pub mod parameters;
pub mod pull_requests;
pub mod registry;
pub mod runner;
pub mod summary;
pub mod templates;

pub use config::{
    ConfigError, GitRepository, JobCollection, ProjectDefaults, ValueMap, DEFAULT_PROJECT_FILE,
};
pub use generator::{
    changelog_to_branch_supported, GeneratorError, JobOverride, PullRequestGenerator,
};
pub use jenkins::{JenkinsClient, JenkinsCredentials, JenkinsError, JobHost};
pub use parameters::{annotate_parameter_classes, param_type, ParameterSpec};
pub use pull_requests::{BitbucketCredentials, HostKind, PullRequest, PullRequestSource, SourceError};
pub use registry::{InstalledPlugins, PluginRegistry, PluginVersion, VersionError, SCM_PLUGIN};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{JobRenderer, TemplateError};
