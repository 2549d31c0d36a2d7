//! Installed plugin registry.
//!
//! Some job options only exist in newer versions of a Jenkins plugin. The
//! generator asks a [`PluginRegistry`] for the installed version before
//! emitting such options.

mod version;

pub use version::{PluginVersion, VersionError};

use std::collections::HashMap;

/// Short name of the SCM plugin providing git checkouts.
pub const SCM_PLUGIN: &str = "git";

/// Looks up the installed version of a plugin.
pub trait PluginRegistry: Send + Sync {
    /// Returns the installed version of `plugin`, or `None` if it is not installed.
    fn installed_version(&self, plugin: &str) -> Option<PluginVersion>;
}

/// Plugin versions known up front, e.g. loaded from a Jenkins server or
/// given on the command line.
#[derive(Debug, Clone, Default)]
pub struct InstalledPlugins {
    versions: HashMap<String, PluginVersion>,
}

impl InstalledPlugins {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the installed version of a plugin.
    pub fn insert(&mut self, plugin: impl Into<String>, version: PluginVersion) {
        self.versions.insert(plugin.into(), version);
    }

    /// Records the installed version of a plugin, builder style.
    #[must_use]
    pub fn with(mut self, plugin: impl Into<String>, version: PluginVersion) -> Self {
        self.insert(plugin, version);
        self
    }

    /// Number of plugins known.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if no plugin is known.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl PluginRegistry for InstalledPlugins {
    fn installed_version(&self, plugin: &str) -> Option<PluginVersion> {
        self.versions.get(plugin).cloned()
    }
}

impl FromIterator<(String, PluginVersion)> for InstalledPlugins {
    fn from_iter<I: IntoIterator<Item = (String, PluginVersion)>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}
