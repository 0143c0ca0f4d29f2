//! File-based configuration, usually expected in a `handles.toml` file.
//!
//! Keys are kept exactly as written: type tags and PHIDs are case-sensitive.
//!
//! ```toml
//! [resolver]
//! max_concurrent_groups = 4
//!
//! [external_loaders]
//! "xyz!" = { type = "static", handles = { "PHID-xyz!-1" = { name = "xyz!" } } }
//! "*" = "fallback"
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{HandleError, HandleResult};

const DEFAULT_MAX_CONCURRENT_GROUPS: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandleConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// External loader entries keyed by type tag, or `*` for the wildcard.
    #[serde(default)]
    pub external_loaders: HashMap<String, JsonValue>,
}

impl HandleConfig {
    /// Loads the configuration from a file.
    pub fn new(config_path: &str) -> HandleResult<Self> {
        let content =
            std::fs::read_to_string(config_path).map_err(|source| HandleError::ConfigRead {
                path: config_path.to_string(),
                source,
            })?;
        Self::from_toml(config_path, &content)
    }

    fn from_toml(config_path: &str, content: &str) -> HandleResult<Self> {
        toml::from_str(content).map_err(|source| HandleError::ConfigParse {
            path: config_path.to_string(),
            source,
        })
    }
}

/// Tuning of the resolution fan-out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Type groups resolved at the same time. Values below 1 are treated as 1.
    pub max_concurrent_groups: usize,
}

impl ResolverConfig {
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_groups.max(1)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent_groups: DEFAULT_MAX_CONCURRENT_GROUPS,
        }
    }
}
