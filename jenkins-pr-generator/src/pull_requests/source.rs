//! Open pull request lookup against GitHub, GitHub Enterprise and Bitbucket.

use super::types::{BitbucketPage, GitHubPull};
use super::{pulls_endpoint, HostKind, PullRequest, SourceError};
use crate::config::GitRepository;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::env;
use tracing::{debug, info, info_span, warn, Instrument};

/// Environment variable holding the Bitbucket user name.
pub const BITBUCKET_USER_VAR: &str = "BITBUCKET_USER";

/// Environment variable holding the Bitbucket password or app password.
pub const BITBUCKET_PASSWORD_VAR: &str = "BITBUCKET_PASSWORD";

/// HTTP Basic credentials for the Bitbucket API.
#[derive(Clone)]
pub struct BitbucketCredentials {
    /// Account user name.
    pub user: String,
    /// Password or app password.
    pub password: String,
}

impl std::fmt::Debug for BitbucketCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitbucketCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl BitbucketCredentials {
    /// Reads credentials from `BITBUCKET_USER` and `BITBUCKET_PASSWORD`.
    ///
    /// Returns `None` if the user is not set; a missing password is sent as empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let user = env::var(BITBUCKET_USER_VAR).ok()?;
        let password = env::var(BITBUCKET_PASSWORD_VAR).unwrap_or_default();
        Some(Self { user, password })
    }
}

/// Looks up the open pull requests of one repository.
#[derive(Debug, Clone)]
pub struct PullRequestSource {
    http_client: reqwest::Client,
    repository: GitRepository,
    bitbucket_credentials: Option<BitbucketCredentials>,
}

impl PullRequestSource {
    /// Creates a source for `repository`, reading Bitbucket credentials from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(repository: GitRepository) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(SourceError::ClientBuild)?;

        Ok(Self::with_client(
            http_client,
            repository,
            BitbucketCredentials::from_env(),
        ))
    }

    /// Creates a source from an existing HTTP client and explicit credentials.
    #[must_use]
    pub fn with_client(
        http_client: reqwest::Client,
        repository: GitRepository,
        bitbucket_credentials: Option<BitbucketCredentials>,
    ) -> Self {
        Self {
            http_client,
            repository,
            bitbucket_credentials,
        }
    }

    /// Returns the repository this source queries.
    pub fn repository(&self) -> &GitRepository {
        &self.repository
    }

    /// Returns the kind of service hosting the repository.
    pub fn host_kind(&self) -> HostKind {
        HostKind::detect(&self.repository.url)
    }

    /// Fetches the currently open pull requests.
    ///
    /// Only the first page returned by the service is read.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ConnectionFailed`] naming the host kind if the
    /// request fails, the service answers with a non-success status, or the
    /// body cannot be decoded.
    pub async fn fetch(&self) -> Result<Vec<PullRequest>, SourceError> {
        let host = self.host_kind();
        let span = info_span!(
            "fetch_pull_requests",
            host = %host,
            repo = %self.repository.full_name()
        );

        async {
            let Some(endpoint) = pulls_endpoint(host, &self.repository) else {
                warn!(url = %self.repository.url, "Cannot derive API endpoint from git_url");
                return Err(SourceError::ConnectionFailed { host });
            };

            let pull_requests = self.fetch_from(host, &endpoint).await?;
            info!(count = pull_requests.len(), "Fetched open pull requests");
            Ok(pull_requests)
        }
        .instrument(span)
        .await
    }

    /// Queries `endpoint` and decodes it according to `host`.
    async fn fetch_from(
        &self,
        host: HostKind,
        endpoint: &str,
    ) -> Result<Vec<PullRequest>, SourceError> {
        debug!(endpoint, "Requesting pull requests");

        let result = match host {
            HostKind::GitHub | HostKind::GitHubEnterprise => self
                .get_json::<Vec<GitHubPull>>(endpoint, false)
                .await
                .map(|pulls| {
                    pulls
                        .into_iter()
                        .map(|p| PullRequest::Numbered(p.number))
                        .collect()
                }),
            HostKind::Bitbucket => self
                .get_json::<BitbucketPage>(endpoint, true)
                .await
                .map(|page| {
                    page.values
                        .into_iter()
                        .map(|p| PullRequest::Branched {
                            id: p.id,
                            branch: p.source.branch.name,
                        })
                        .collect()
                }),
        };

        result.map_err(|e| {
            debug!(error = %e, "Pull request lookup failed");
            SourceError::ConnectionFailed { host }
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        authenticated: bool,
    ) -> Result<T, reqwest::Error> {
        let mut request = self
            .http_client
            .get(endpoint)
            .header(ACCEPT, "application/json");

        if authenticated {
            if let Some(credentials) = &self.bitbucket_credentials {
                request = request.basic_auth(&credentials.user, Some(&credentials.password));
            }
        }

        request.send().await?.error_for_status()?.json::<T>().await
    }
}
