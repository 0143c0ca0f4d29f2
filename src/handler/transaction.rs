use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Phid, PhidType, Viewer};

use super::TypeHandler;
use crate::classify::group_by_subtype;
use crate::object::{erase, ObjectMap};
use crate::records::TransactionRecord;
use crate::store::{ObjectStore, Scoping};

/// Transactions are stored per application, so the group is split by subtype
/// (`PHID-XACT-MOCK-...`) and each subgroup goes to the store registered for it.
#[derive(Default)]
pub struct TransactionHandler {
    stores: HashMap<PhidType, Arc<dyn ObjectStore<TransactionRecord>>>,
}

impl TransactionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subtype(
        mut self,
        subtype: PhidType,
        store: Arc<dyn ObjectStore<TransactionRecord>>,
    ) -> Self {
        self.stores.insert(subtype, store);
        self
    }
}

#[async_trait]
impl TypeHandler for TransactionHandler {
    fn name(&self) -> &'static str {
        "transaction"
    }

    fn phid_type(&self) -> PhidType {
        PhidType::TRANSACTION
    }

    fn noun(&self) -> &'static str {
        "Transaction"
    }

    async fn load_objects(&self, phids: &[Phid], viewer: Option<&Viewer>) -> Result<ObjectMap> {
        let mut objects = ObjectMap::new();
        for group in group_by_subtype(phids) {
            let Some(store) = self.stores.get(&group.phid_type) else {
                tracing::debug!(
                    target: "phid_handles::handler",
                    subtype = %group.phid_type,
                    count = group.phids.len(),
                    "no transaction store for subtype"
                );
                continue;
            };
            let loaded = Scoping::Viewer
                .load(store.as_ref(), &group.phids, viewer)
                .await?;
            objects.extend(erase(loaded));
        }
        Ok(objects)
    }
}
