//! Per pull request SCM overrides applied to job definitions.

use crate::config::ValueMap;
use crate::pull_requests::PullRequest;
use crate::registry::PluginVersion;
use serde_json::{json, Value};

/// Name of the remote used for changelog computation.
const CHANGELOG_REMOTE: &str = "origin";

/// Returns true if the installed SCM plugin supports restricting the
/// changelog to a branch, i.e. its version is strictly greater than 2.0.
#[must_use]
pub fn changelog_to_branch_supported(scm_version: Option<&PluginVersion>) -> bool {
    scm_version.is_some_and(|version| *version > PluginVersion::from_components(&[2, 0]))
}

/// SCM settings that make a job build one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOverride {
    /// Branch specifier checked out by the job.
    pub scm_branch: String,

    /// Extra refspec to fetch; empty when the branch is fetched by name.
    pub refspec: String,

    /// Local branch used for changelog computation.
    pub local_branch: String,
}

impl JobOverride {
    /// Computes the overrides for a pull request.
    ///
    /// Numbered pull requests are fetched through `refs/pull/{id}/head`;
    /// branched ones are checked out by branch name.
    #[must_use]
    pub fn for_pull_request(pr: &PullRequest) -> Self {
        match pr {
            PullRequest::Branched { branch, .. } => Self {
                scm_branch: branch.clone(),
                refspec: String::new(),
                local_branch: branch.clone(),
            },
            PullRequest::Numbered(id) => Self {
                scm_branch: format!("origin/pr/{id}/head"),
                refspec: format!("refs/pull/{id}/head:refs/remotes/origin/pr/{id}/head"),
                local_branch: format!("pr/{id}/head"),
            },
        }
    }

    /// Writes the overrides into a job definition.
    ///
    /// `scm_params` is created when absent. `changelog_to_branch` is only
    /// written when `changelog_to_branch` is true, and is merged into an
    /// existing table.
    pub fn apply(&self, job: &mut ValueMap, changelog_to_branch: bool) {
        job.insert(
            "scm_branch".to_string(),
            Value::String(self.scm_branch.clone()),
        );

        let mut scm_params = take_table(job, "scm_params");
        scm_params.insert("refspec".to_string(), Value::String(self.refspec.clone()));

        if changelog_to_branch {
            let mut changelog = take_table(&mut scm_params, "changelog_to_branch");
            changelog.insert("remote".to_string(), json!(CHANGELOG_REMOTE));
            changelog.insert(
                "branch".to_string(),
                Value::String(self.local_branch.clone()),
            );
            scm_params.insert("changelog_to_branch".to_string(), Value::Object(changelog));
        }

        job.insert("scm_params".to_string(), Value::Object(scm_params));
    }
}

/// Removes and returns the table stored under `key`; any other value is dropped.
fn take_table(map: &mut ValueMap, key: &str) -> ValueMap {
    match map.remove(key) {
        Some(Value::Object(table)) => table,
        _ => ValueMap::new(),
    }
}
