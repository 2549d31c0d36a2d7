//! Open pull request discovery.
//!
//! Pull requests are listed through the REST API of the service hosting the
//! repository. GitHub and GitHub Enterprise report bare numbers, Bitbucket
//! additionally reports the source branch name.

mod error;
mod host;
mod source;
mod types;

pub use error::SourceError;
pub use host::{pulls_endpoint, HostKind};
pub use source::{
    BitbucketCredentials, PullRequestSource, BITBUCKET_PASSWORD_VAR, BITBUCKET_USER_VAR,
};

/// An open pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequest {
    /// Identified by number only; the head is fetched through the
    /// `refs/pull/{id}/head` ref.
    Numbered(u64),

    /// Identified by number with an explicit source branch.
    Branched {
        /// Pull request number.
        id: u64,
        /// Source branch name.
        branch: String,
    },
}

impl PullRequest {
    /// Returns the pull request number.
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Numbered(id) | Self::Branched { id, .. } => *id,
        }
    }

    /// Returns the explicit source branch, if the host reported one.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Numbered(_) => None,
            Self::Branched { branch, .. } => Some(branch),
        }
    }

    /// Returns the job name prefix for this pull request.
    ///
    /// Format: "{application_name}-PR{id}"
    #[must_use]
    pub fn job_name(&self, application_name: &str) -> String {
        format!("{}-PR{}", application_name, self.id())
    }
}
