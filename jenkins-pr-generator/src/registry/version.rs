//! Plugin version parsing and comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A version string that does not start with a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid plugin version '{0}'")]
pub struct VersionError(pub String);

/// A Jenkins plugin version.
///
/// Only the leading dotted numeric components take part in comparisons;
/// missing components count as zero, so `2`, `2.0` and `2.0.0` are equal.
/// Qualifiers such as `-rc1` or `.v1234abcd` are kept for display only.
#[derive(Debug, Clone)]
pub struct PluginVersion {
    components: Vec<u64>,
    raw: String,
}

impl PluginVersion {
    /// Builds a version from numeric components.
    #[must_use]
    pub fn from_components(components: &[u64]) -> Self {
        let raw = components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Self {
            components: components.to_vec(),
            raw,
        }
    }

    /// Returns the numeric components.
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for PluginVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let mut components = Vec::new();

        for part in raw.split('.') {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            let Ok(value) = digits.parse::<u64>() else {
                break;
            };
            components.push(value);
            if digits.len() != part.len() {
                break;
            }
        }

        if components.is_empty() {
            return Err(VersionError(s.to_string()));
        }

        Ok(Self {
            components,
            raw: raw.to_string(),
        })
    }
}

impl Ord for PluginVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).copied().unwrap_or(0);
                let b = other.components.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for PluginVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PluginVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PluginVersion {}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
