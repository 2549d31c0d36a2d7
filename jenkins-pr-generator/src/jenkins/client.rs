//! Jenkins JSON API client.

use super::types::{JobsResponse, PluginsResponse};
use super::{JenkinsError, JobHost};
use crate::registry::{InstalledPlugins, PluginVersion};
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Jenkins user name and API token.
#[derive(Clone)]
pub struct JenkinsCredentials {
    /// Jenkins user name.
    pub user: String,
    /// API token of the user.
    pub token: String,
}

impl std::fmt::Debug for JenkinsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JenkinsCredentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Client for a single Jenkins server.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    client: Client,
    server_url: String,
    credentials: Option<JenkinsCredentials>,
}

impl JenkinsClient {
    /// Creates a client for the server at `server_url`.
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(
        server_url: &str,
        credentials: Option<JenkinsCredentials>,
    ) -> Result<Self, JenkinsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(JenkinsError::ClientBuild)?;

        Ok(Self::with_client(client, server_url, credentials))
    }

    /// Creates a client reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(
        client: Client,
        server_url: &str,
        credentials: Option<JenkinsCredentials>,
    ) -> Self {
        Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Returns the server base URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Loads the installed plugins and their versions.
    ///
    /// Plugins reporting a version without a numeric prefix are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsError::Request`] if the plugin manager cannot be queried.
    pub async fn installed_plugins(&self) -> Result<InstalledPlugins, JenkinsError> {
        let url = format!(
            "{}/pluginManager/api/json?depth=1&tree=plugins[shortName,version]",
            self.server_url
        );
        let response: PluginsResponse = self.get_json(&url).await?;

        let plugins: InstalledPlugins = response
            .plugins
            .into_iter()
            .filter_map(|plugin| match plugin.version.parse::<PluginVersion>() {
                Ok(version) => Some((plugin.short_name, version)),
                Err(e) => {
                    warn!(plugin = %plugin.short_name, error = %e, "Skipping plugin");
                    None
                }
            })
            .collect();

        info!(count = plugins.len(), "Loaded installed plugins");
        Ok(plugins)
    }

    /// Builds `{server}/job/{a}/job/{b}/{action}` for a job path `a/b`.
    fn job_url(&self, name: &str, action: &str) -> Result<Url, JenkinsError> {
        let mut url = Url::parse(&self.server_url).map_err(|e| JenkinsError::InvalidUrl {
            url: self.server_url.clone(),
            message: e.to_string(),
        })?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| JenkinsError::InvalidUrl {
                    url: self.server_url.clone(),
                    message: "URL cannot be a base".to_string(),
                })?;
            segments.pop_if_empty();
            for part in name.split('/').filter(|p| !p.is_empty()) {
                segments.push("job").push(part);
            }
            segments.push(action);
        }

        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => request.basic_auth(&credentials.user, Some(&credentials.token)),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, JenkinsError> {
        let request_error = |source: reqwest::Error| JenkinsError::Request {
            url: url.to_string(),
            source,
        };

        self.authorize(self.client.get(url))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?
            .json()
            .await
            .map_err(request_error)
    }
}

#[async_trait]
impl JobHost for JenkinsClient {
    async fn list(&self, pattern: &str) -> Result<Vec<String>, JenkinsError> {
        let regex = Regex::new(pattern).map_err(|e| JenkinsError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })?;

        let url = format!("{}/api/json?tree=jobs[name]", self.server_url);
        let response: JobsResponse = self.get_json(&url).await?;

        let names: Vec<String> = response
            .jobs
            .into_iter()
            .map(|job| job.name)
            .filter(|name| regex.is_match(name))
            .collect();

        debug!(pattern, count = names.len(), "Listed jobs");
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<(), JenkinsError> {
        let url = self.job_url(name, "doDelete")?;
        let url_string = url.to_string();

        self.authorize(self.client.post(url))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| JenkinsError::Request {
                url: url_string,
                source,
            })?;

        info!(job = name, "Deleted job");
        Ok(())
    }
}
