use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Phid, PhidType, Viewer};

use super::TypeHandler;
use crate::object::{erase, ObjectMap, PhidObject};
use crate::store::{ObjectStore, Scoping};

/// Handler for types whose handles come straight from one record type.
pub struct ObjectHandler<T: PhidObject> {
    name: &'static str,
    phid_type: PhidType,
    noun: &'static str,
    scoping: Scoping,
    store: Arc<dyn ObjectStore<T>>,
}

impl<T: PhidObject> ObjectHandler<T> {
    /// Creates an unscoped handler.
    pub fn new(
        name: &'static str,
        phid_type: PhidType,
        noun: &'static str,
        store: Arc<dyn ObjectStore<T>>,
    ) -> Self {
        Self {
            name,
            phid_type,
            noun,
            scoping: Scoping::Unscoped,
            store,
        }
    }

    /// Routes loads through the viewer-aware path when a viewer is present.
    pub fn viewer_scoped(mut self) -> Self {
        self.scoping = Scoping::Viewer;
        self
    }

    pub fn scoping(&self) -> Scoping {
        self.scoping
    }
}

#[async_trait]
impl<T: PhidObject> TypeHandler for ObjectHandler<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn phid_type(&self) -> PhidType {
        self.phid_type
    }

    fn noun(&self) -> &'static str {
        self.noun
    }

    async fn load_objects(&self, phids: &[Phid], viewer: Option<&Viewer>) -> Result<ObjectMap> {
        let objects = self.scoping.load(self.store.as_ref(), phids, viewer).await?;
        tracing::trace!(
            target: "phid_handles::handler",
            handler = self.name,
            requested = phids.len(),
            loaded = objects.len(),
            scoped = viewer.is_some() && self.scoping == Scoping::Viewer,
            "loaded objects"
        );
        Ok(erase(objects))
    }
}
