//! Hosting service detection and API endpoint construction.

use crate::config::GitRepository;
use std::fmt;
use url::Url;

/// The kind of service hosting a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// github.com
    GitHub,

    /// bitbucket.org
    Bitbucket,

    /// Any other URL is assumed to be a GitHub Enterprise instance.
    GitHubEnterprise,
}

impl HostKind {
    /// Detects the host kind from a repository base URL.
    #[must_use]
    pub fn detect(git_url: &str) -> Self {
        if git_url.contains("github.com") {
            Self::GitHub
        } else if git_url.contains("bitbucket.org") {
            Self::Bitbucket
        } else {
            Self::GitHubEnterprise
        }
    }

    /// Returns the display name of the service.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Bitbucket => "Bitbucket",
            Self::GitHubEnterprise => "GitHub Enterprise",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the URL listing open pull requests for a repository.
///
/// Returns `None` when a github.com URL has no scheme or host to derive
/// the `api.` host from.
#[must_use]
pub fn pulls_endpoint(kind: HostKind, repository: &GitRepository) -> Option<String> {
    let GitRepository { url, org, repo } = repository;
    let base = url.trim_end_matches('/');

    match kind {
        HostKind::GitHub => {
            let parsed = Url::parse(url).ok()?;
            let host = parsed.host_str()?;
            Some(format!(
                "{}://api.{}/repos/{}/{}/pulls",
                parsed.scheme(),
                host,
                org,
                repo
            ))
        }
        HostKind::Bitbucket => Some(format!(
            "{base}/api/2.0/repositories/{org}/{repo}/pullrequests/"
        )),
        HostKind::GitHubEnterprise => Some(format!("{base}/api/v3/repos/{org}/{repo}/pulls")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(url: &str) -> GitRepository {
        GitRepository::new(url, "acme", "svc").unwrap()
    }

    #[test]
    fn detects_host_kind() {
        assert_eq!(HostKind::detect("https://github.com"), HostKind::GitHub);
        assert_eq!(
            HostKind::detect("https://bitbucket.org"),
            HostKind::Bitbucket
        );
        assert_eq!(
            HostKind::detect("https://git.example.com"),
            HostKind::GitHubEnterprise
        );
    }

    #[test]
    fn github_endpoint_uses_api_subdomain() {
        let endpoint = pulls_endpoint(HostKind::GitHub, &repository("https://github.com/"));
        assert_eq!(
            endpoint.as_deref(),
            Some("https://api.github.com/repos/acme/svc/pulls")
        );
    }

    #[test]
    fn github_endpoint_requires_absolute_url() {
        let endpoint = pulls_endpoint(HostKind::GitHub, &repository("github.com"));
        assert_eq!(endpoint, None);
    }

    #[test]
    fn bitbucket_endpoint_lists_pullrequests() {
        let endpoint = pulls_endpoint(HostKind::Bitbucket, &repository("https://bitbucket.org"));
        assert_eq!(
            endpoint.as_deref(),
            Some("https://bitbucket.org/api/2.0/repositories/acme/svc/pullrequests/")
        );
    }

    #[test]
    fn enterprise_endpoint_uses_v3_api() {
        let endpoint = pulls_endpoint(
            HostKind::GitHubEnterprise,
            &repository("https://git.example.com/"),
        );
        assert_eq!(
            endpoint.as_deref(),
            Some("https://git.example.com/api/v3/repos/acme/svc/pulls")
        );
    }

    #[test]
    fn host_names_match_error_wording() {
        assert_eq!(HostKind::GitHub.to_string(), "GitHub");
        assert_eq!(HostKind::Bitbucket.to_string(), "Bitbucket");
        assert_eq!(HostKind::GitHubEnterprise.to_string(), "GitHub Enterprise");
    }
}
