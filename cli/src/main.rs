//! CLI for the Jenkins pull request job generator.
//!
//! This tool writes one job collection per open pull request and deletes the
//! Jenkins jobs of pull requests that have been closed.

use clap::Parser;
use jenkins_pr_generator::{
    JenkinsCredentials, PluginVersion, RunSummary, Runner, RunnerConfig, RunnerError,
    DEFAULT_PROJECT_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Jenkins PR Generator - Generate per-pull-request jobs and delete jobs of closed pull requests.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the project file.
    #[arg(long, default_value = DEFAULT_PROJECT_FILE)]
    project: PathBuf,

    /// Directory receiving the generated job collections.
    #[arg(long, default_value = "generated/")]
    output_dir: PathBuf,

    /// Jenkins server URL used for plugin lookup and job cleanup.
    #[arg(long, env = "JENKINS_URL")]
    jenkins_url: Option<String>,

    /// Jenkins user name.
    #[arg(long, env = "JENKINS_USER", requires = "jenkins_token")]
    jenkins_user: Option<String>,

    /// Jenkins API token.
    #[arg(long, env = "JENKINS_TOKEN", hide_env_values = true, requires = "jenkins_user")]
    jenkins_token: Option<String>,

    /// Assume this git plugin version instead of asking Jenkins.
    #[arg(long)]
    scm_version: Option<PluginVersion>,

    /// Generate jobs without deleting anything on Jenkins.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Both ring and aws-lc-rs may be linked; pick one explicitly.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut config = RunnerConfig::new(args.project, args.output_dir, args.debug);

    if let Some(url) = args.jenkins_url {
        let credentials = match (args.jenkins_user, args.jenkins_token) {
            (Some(user), Some(token)) => Some(JenkinsCredentials { user, token }),
            _ => None,
        };
        config = config.with_jenkins(url, credentials);
    }
    if let Some(version) = args.scm_version {
        config = config.with_scm_version(version);
    }

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Mode: {}", if summary.debug { "Debug" } else { "Live" });
    println!("  Open pull requests: {}", summary.open_prs);
    println!("  Pull requests generated: {}", summary.prs_generated);
    println!("  Pull requests failed: {}", summary.prs_failed);
    println!("  Jobs generated: {}", summary.jobs_generated);

    if !summary.debug {
        println!("  Jobs deleted: {}", summary.jobs_deleted.len());
        for job in &summary.jobs_deleted {
            println!("    - {job}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JENKINS_VARS: [&str; 3] = ["JENKINS_URL", "JENKINS_USER", "JENKINS_TOKEN"];

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        temp_env::with_vars_unset(JENKINS_VARS, || {
            Args::try_parse_from(std::iter::once("jenkins-pr-generator").chain(args.iter().copied()))
        })
    }

    #[test]
    fn defaults_to_project_file_in_working_directory() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.project, PathBuf::from(DEFAULT_PROJECT_FILE));
        assert!(!args.debug);
    }

    #[test]
    fn token_without_user_is_rejected() {
        let err = parse(&["--jenkins-url", "http://jenkins", "--jenkins-token", "t"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn user_without_token_is_rejected() {
        let err = parse(&["--jenkins-user", "admin"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn user_and_token_are_accepted_together() {
        let args = parse(&["--jenkins-user", "admin", "--jenkins-token", "t"]).unwrap();
        assert_eq!(args.jenkins_user.as_deref(), Some("admin"));
        assert_eq!(args.jenkins_token.as_deref(), Some("t"));
    }
}
