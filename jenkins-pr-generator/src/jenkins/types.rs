//! Jenkins JSON API response shapes.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct JobsResponse {
    #[serde(default)]
    pub jobs: Vec<JobItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobItem {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PluginsResponse {
    #[serde(default)]
    pub plugins: Vec<PluginItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PluginItem {
    pub short_name: String,
    pub version: String,
}
