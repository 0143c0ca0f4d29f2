//! Collaborator contracts for the storage layer.
//!
//! Every built-in type is backed by one [`ObjectStore`]. The engine issues one bulk call
//! per type group and never one call per PHID. PHIDs with no matching object are
//! simply absent from the returned map.

pub mod memory;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Phid, Viewer};

use crate::object::PhidObject;
use crate::records::UserStatusRecord;

pub use memory::{MemoryStatusStore, MemoryStore};

/// Bulk object loader for one record type.
#[async_trait]
pub trait ObjectStore<T: PhidObject>: Send + Sync {
    /// Loads every requested object that exists, ignoring visibility.
    async fn load_all(&self, phids: &[Phid]) -> Result<HashMap<Phid, T>>;

    /// Loads the requested objects the viewer is allowed to see.
    ///
    /// Stores for types without a visibility policy can keep the default, which
    /// behaves like [`ObjectStore::load_all`].
    async fn load_visible(&self, phids: &[Phid], viewer: &Viewer) -> Result<HashMap<Phid, T>> {
        let _ = viewer;
        self.load_all(phids).await
    }
}

/// Loads the status row currently in effect for each user.
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn load_current_statuses(
        &self,
        user_phids: &[Phid],
    ) -> Result<HashMap<Phid, UserStatusRecord>>;
}

/// Whether a type's loads go through the viewer-aware query path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoping {
    /// Always loaded with [`ObjectStore::load_all`].
    Unscoped,
    /// Loaded with [`ObjectStore::load_visible`] when a viewer is present.
    ///
    /// Without a viewer the unscoped path is used: anonymous resolution sees every
    /// object that exists.
    Viewer,
}

impl Scoping {
    pub async fn load<T: PhidObject>(
        self,
        store: &dyn ObjectStore<T>,
        phids: &[Phid],
        viewer: Option<&Viewer>,
    ) -> Result<HashMap<Phid, T>> {
        match (self, viewer) {
            (Self::Viewer, Some(viewer)) => store.load_visible(phids, viewer).await,
            _ => store.load_all(phids).await,
        }
    }
}
