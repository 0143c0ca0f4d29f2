//! In-memory store implementations.
//!
//! Used by the `phid-lookup` binary to serve fixtures, and by tests to observe how
//! the engine talks to its stores: every bulk call bumps a query counter, objects
//! can be restricted to a set of viewers, and a store can be switched to failing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Phid, Viewer};
use tokio::sync::RwLock;

use super::{ObjectStore, StatusStore};
use crate::object::PhidObject;
use crate::records::UserStatusRecord;

#[derive(Debug, Default)]
struct StoreStats {
    queries: AtomicUsize,
    failing: AtomicBool,
}

impl StoreStats {
    fn begin(&self, store: &str) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("{store} is unavailable");
        }
        Ok(())
    }
}

/// Object store backed by a `HashMap`.
pub struct MemoryStore<T> {
    objects: RwLock<HashMap<Phid, T>>,
    /// Objects only visible to the listed viewers.
    restrictions: RwLock<HashMap<Phid, HashSet<Phid>>>,
    stats: StoreStats,
}

impl<T: PhidObject + Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_objects(Vec::new())
    }

    pub fn with_objects(objects: impl IntoIterator<Item = T>) -> Self {
        let objects = objects
            .into_iter()
            .map(|object| (object.phid().clone(), object))
            .collect();
        Self {
            objects: RwLock::new(objects),
            restrictions: RwLock::new(HashMap::new()),
            stats: StoreStats::default(),
        }
    }

    pub async fn insert(&self, object: T) {
        self.objects
            .write()
            .await
            .insert(object.phid().clone(), object);
    }

    pub async fn remove(&self, phid: &Phid) -> Option<T> {
        self.objects.write().await.remove(phid)
    }

    /// Hides an object from every viewer not listed, on the viewer-scoped path.
    pub async fn restrict(&self, phid: impl Into<Phid>, viewers: impl IntoIterator<Item = Phid>) {
        self.restrictions
            .write()
            .await
            .insert(phid.into(), viewers.into_iter().collect());
    }

    pub fn set_failing(&self, failing: bool) {
        self.stats.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of bulk loads served so far.
    pub fn query_count(&self) -> usize {
        self.stats.queries.load(Ordering::SeqCst)
    }

    async fn collect(&self, phids: &[Phid], viewer: Option<&Viewer>) -> HashMap<Phid, T> {
        let objects = self.objects.read().await;
        let restrictions = self.restrictions.read().await;

        phids
            .iter()
            .filter_map(|phid| objects.get(phid).map(|object| (phid, object)))
            .filter(|(phid, _)| match (viewer, restrictions.get(*phid)) {
                (Some(viewer), Some(allowed)) => allowed.contains(&viewer.phid),
                _ => true,
            })
            .map(|(phid, object)| (phid.clone(), object.clone()))
            .collect()
    }
}

impl<T: PhidObject + Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: PhidObject + Clone> ObjectStore<T> for MemoryStore<T> {
    async fn load_all(&self, phids: &[Phid]) -> Result<HashMap<Phid, T>> {
        self.stats.begin("memory store")?;
        Ok(self.collect(phids, None).await)
    }

    async fn load_visible(&self, phids: &[Phid], viewer: &Viewer) -> Result<HashMap<Phid, T>> {
        self.stats.begin("memory store")?;
        Ok(self.collect(phids, Some(viewer)).await)
    }
}

/// Status store backed by a `HashMap` of the latest row per user.
#[derive(Default)]
pub struct MemoryStatusStore {
    statuses: RwLock<HashMap<Phid, UserStatusRecord>>,
    stats: StoreStats,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(statuses: impl IntoIterator<Item = UserStatusRecord>) -> Self {
        let statuses = statuses
            .into_iter()
            .map(|status| (status.user_phid.clone(), status))
            .collect();
        Self {
            statuses: RwLock::new(statuses),
            stats: StoreStats::default(),
        }
    }

    pub async fn insert(&self, status: UserStatusRecord) {
        self.statuses
            .write()
            .await
            .insert(status.user_phid.clone(), status);
    }

    pub fn set_failing(&self, failing: bool) {
        self.stats.failing.store(failing, Ordering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.stats.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn load_current_statuses(
        &self,
        user_phids: &[Phid],
    ) -> Result<HashMap<Phid, UserStatusRecord>> {
        self.stats.begin("status store")?;
        let now = chrono::Utc::now().timestamp();
        let statuses = self.statuses.read().await;

        Ok(user_phids
            .iter()
            .filter_map(|phid| statuses.get(phid))
            .filter(|status| status.date_from <= now && now < status.date_to)
            .map(|status| (status.user_phid.clone(), status.clone()))
            .collect())
    }
}
