//! Loaders for PHID types owned by other components.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use phid_types::{Handle, Phid};
use serde::Deserialize;
use serde_json::Value;

use super::HandleMap;

/// Capability of an external component to produce handles for its own PHIDs.
///
/// Handles returned here are merged into the result untouched.
#[async_trait]
pub trait ObjectHandleLoader: Send + Sync {
    async fn load_handles(&self, phids: &[Phid]) -> Result<HandleMap>;
}

/// Builds external loaders from configuration entries.
///
/// Registered on the [`HandlerRegistry`](crate::registry::HandlerRegistry) under its
/// kind; entries naming that kind are handed to [`LoaderFactory::create`] with the
/// `type` field already removed.
#[async_trait]
pub trait LoaderFactory: Send + Sync {
    /// Kind string used by configuration (`type = "…"`).
    fn kind(&self) -> &'static str;

    /// Construct a loader from a configuration payload.
    async fn create(&self, config: &Value) -> Result<Arc<dyn ObjectHandleLoader>>;
}

#[derive(Debug, Clone, Deserialize)]
struct StaticEntry {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StaticLoaderConfig {
    #[serde(default)]
    handles: HashMap<Phid, StaticEntry>,
}

/// Loader serving a fixed table of handles. PHIDs not in the table are omitted.
#[derive(Debug, Clone, Default)]
pub struct StaticHandleLoader {
    handles: HashMap<Phid, Handle>,
}

impl StaticHandleLoader {
    pub fn new(handles: impl IntoIterator<Item = Handle>) -> Self {
        Self {
            handles: handles
                .into_iter()
                .map(|handle| (handle.phid.clone(), handle))
                .collect(),
        }
    }
}

#[async_trait]
impl ObjectHandleLoader for StaticHandleLoader {
    async fn load_handles(&self, phids: &[Phid]) -> Result<HandleMap> {
        Ok(phids
            .iter()
            .filter_map(|phid| {
                self.handles
                    .get(phid)
                    .map(|handle| (phid.clone(), handle.clone()))
            })
            .collect())
    }
}

/// Factory for [`StaticHandleLoader`], kind `static`.
///
/// ```toml
/// [external_loaders."XYZ!"]
/// type = "static"
/// handles = { "PHID-XYZ!-1" = { name = "xyz!", uri = "/xyz/1" } }
/// ```
#[derive(Debug, Default)]
pub struct StaticLoaderFactory;

impl StaticLoaderFactory {
    pub const KIND: &'static str = "static";
}

#[async_trait]
impl LoaderFactory for StaticLoaderFactory {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(&self, config: &Value) -> Result<Arc<dyn ObjectHandleLoader>> {
        let config: StaticLoaderConfig = serde_json::from_value(config.clone())
            .context("failed to parse static loader config")?;

        let handles = config.handles.into_iter().map(|(phid, entry)| {
            let mut handle = Handle::new(phid, entry.name).completed();
            handle.full_name = entry.full_name;
            handle.uri = entry.uri;
            handle
        });
        Ok(Arc::new(StaticHandleLoader::new(handles)))
    }
}
