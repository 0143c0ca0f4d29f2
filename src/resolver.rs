//! Batch resolution facade.
//!
//! A query is classified into type groups; each group is dispatched once to its
//! built-in handler, its external loader, or the unknown-object fallback. Groups run
//! concurrently up to [`ResolverConfig::max_concurrent_groups`] and their results are
//! merged in first-seen group order.
//!
//! Every distinct requested PHID gets exactly one handle. A store failure only degrades
//! its own group to placeholders; configuration errors fail the whole call.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use phid_types::{Handle, Phid, Viewer};
use tracing::Instrument;

use crate::classify::{dedup, group_by_type, PhidGroup};
use crate::config::ResolverConfig;
use crate::error::{HandleError, HandleResult};
use crate::handler::{unknown_object, HandleMap, TypeHandler};
use crate::object::ObjectMap;
use crate::registry::{ExternalLoader, HandlerRegistry, Resolution};

pub struct HandleResolver {
    registry: Arc<HandlerRegistry>,
    config: ResolverConfig,
}

impl HandleResolver {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    pub fn with_config(registry: Arc<HandlerRegistry>, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Starts a query for a batch of PHIDs. Duplicates are collapsed.
    pub fn query<I>(&self, phids: I) -> HandleQuery<'_>
    where
        I: IntoIterator,
        I::Item: Into<Phid>,
    {
        HandleQuery {
            resolver: self,
            phids: dedup(phids),
            viewer: None,
        }
    }

    /// Resolves a batch of PHIDs into handles.
    pub async fn resolve<I>(&self, phids: I, viewer: Option<&Viewer>) -> HandleResult<HandleMap>
    where
        I: IntoIterator,
        I::Item: Into<Phid>,
    {
        let mut query = self.query(phids);
        query.viewer = viewer.cloned();
        query.load_handles().await
    }

    /// Resolves a single PHID.
    pub async fn load_one_handle(
        &self,
        phid: impl Into<Phid>,
        viewer: Option<&Viewer>,
    ) -> HandleResult<Handle> {
        let phid = phid.into();
        let mut handles = self.resolve([phid.clone()], viewer).await?;
        handles.remove(&phid).ok_or(HandleError::MissingHandle(phid))
    }

    async fn resolve_group(
        &self,
        group: &PhidGroup,
        viewer: Option<&Viewer>,
    ) -> HandleResult<HandleMap> {
        match self.registry.lookup(group.phid_type) {
            Resolution::Builtin(handler) => {
                Ok(resolve_builtin(handler.as_ref(), group, viewer).await)
            }
            Resolution::External(loader) => self.resolve_external(loader, group).await,
            Resolution::NotFound => {
                tracing::debug!(
                    target: "phid_handles::resolver",
                    phid_type = %group.phid_type,
                    count = group.phids.len(),
                    "no loader for type"
                );
                Ok(group
                    .phids
                    .iter()
                    .map(|phid| (phid.clone(), unknown_object(phid)))
                    .collect())
            }
        }
    }

    async fn resolve_external(
        &self,
        loader: &ExternalLoader,
        group: &PhidGroup,
    ) -> HandleResult<HandleMap> {
        let instance = self.registry.instantiate(loader).await?;

        let mut handles = match instance.load_handles(&group.phids).await {
            Ok(loaded) => {
                let requested: HashSet<&Phid> = group.phids.iter().collect();
                let before = loaded.len();
                let handles: HandleMap = loaded
                    .into_iter()
                    .filter(|(phid, _)| requested.contains(phid))
                    .collect();
                let foreign = before - handles.len();
                if foreign > 0 {
                    tracing::warn!(
                        target: "phid_handles::resolver",
                        phid_type = %group.phid_type,
                        kind = %loader.kind,
                        foreign,
                        "external loader returned unrequested handles"
                    );
                }
                handles
            }
            Err(e) => {
                tracing::warn!(
                    target: "phid_handles::resolver",
                    phid_type = %group.phid_type,
                    kind = %loader.kind,
                    error = %e,
                    "external loader failed"
                );
                HashMap::new()
            }
        };

        let mut missing = 0usize;
        for phid in &group.phids {
            handles.entry(phid.clone()).or_insert_with(|| {
                missing += 1;
                unknown_object(phid)
            });
        }
        if missing > 0 {
            tracing::warn!(
                target: "phid_handles::resolver",
                phid_type = %group.phid_type,
                kind = %loader.kind,
                missing,
                "external loader omitted handles"
            );
        }
        Ok(handles)
    }
}

async fn resolve_builtin(
    handler: &dyn TypeHandler,
    group: &PhidGroup,
    viewer: Option<&Viewer>,
) -> HandleMap {
    let result: anyhow::Result<HandleMap> = async {
        let objects = handler.load_objects(&group.phids, viewer).await?;
        handler
            .synthesize_handles(&group.phids, &objects, viewer)
            .await
    }
    .await;

    match result {
        Ok(handles) => handles,
        Err(e) => {
            tracing::warn!(
                target: "phid_handles::resolver",
                handler = handler.name(),
                count = group.phids.len(),
                error = %e,
                "handler failed, using placeholders"
            );
            group
                .phids
                .iter()
                .map(|phid| (phid.clone(), handler.placeholder(phid)))
                .collect()
        }
    }
}

/// A pending batch lookup.
pub struct HandleQuery<'a> {
    resolver: &'a HandleResolver,
    phids: Vec<Phid>,
    viewer: Option<Viewer>,
}

impl HandleQuery<'_> {
    /// Resolves on behalf of a viewer: visibility-scoped types only return what the
    /// viewer may see, and user handles carry a dated status title.
    pub fn with_viewer(mut self, viewer: Viewer) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn phids(&self) -> &[Phid] {
        &self.phids
    }

    /// Produces exactly one handle per distinct requested PHID.
    pub async fn load_handles(&self) -> HandleResult<HandleMap> {
        let resolver = self.resolver;
        let viewer = self.viewer.as_ref();
        let groups = group_by_type(&self.phids);

        let span = tracing::debug_span!(
            target: "phid_handles::resolver",
            "load_handles",
            phids = self.phids.len(),
            groups = groups.len()
        );

        let results: Vec<HandleResult<HandleMap>> = stream::iter(groups.iter())
            .map(|group| resolver.resolve_group(group, viewer))
            .buffered(resolver.config.concurrency())
            .collect::<Vec<_>>()
            .instrument(span)
            .await;

        let mut handles = HashMap::with_capacity(self.phids.len());
        for result in results {
            for (phid, handle) in result? {
                handles.entry(phid).or_insert(handle);
            }
        }
        Ok(handles)
    }

    /// Loads the underlying objects of every PHID owned by a built-in handler.
    ///
    /// PHIDs with no object, no built-in handler, or whose group failed to load are
    /// absent from the result.
    pub async fn load_objects(&self) -> ObjectMap {
        let resolver = self.resolver;
        let viewer = self.viewer.as_ref();
        let groups = group_by_type(&self.phids);

        let loads = groups.iter().filter_map(|group| {
            resolver
                .registry
                .handler(group.phid_type)
                .map(|handler| async move {
                    match handler.load_objects(&group.phids, viewer).await {
                        Ok(objects) => objects,
                        Err(e) => {
                            tracing::warn!(
                                target: "phid_handles::resolver",
                                handler = handler.name(),
                                error = %e,
                                "failed to load objects"
                            );
                            ObjectMap::new()
                        }
                    }
                })
        });

        stream::iter(loads)
            .buffered(resolver.config.concurrency())
            .fold(ObjectMap::new(), |mut objects, loaded| async move {
                objects.extend(loaded);
                objects
            })
            .await
    }
}
