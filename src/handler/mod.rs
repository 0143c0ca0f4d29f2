//! Type handlers turn a group of same-typed PHIDs into handles.
//!
//! # Design
//!
//! A handler is responsible for:
//! - Loading every object of its group in one bulk call (`load_objects`).
//! - Producing exactly one handle per PHID of the group (`synthesize_handles`), with a
//!   placeholder for every PHID whose object was not loaded.
//!
//! Most types only need [`ObjectHandler`]: the record's [`PhidObject`](crate::object::PhidObject) impl carries the
//! formatting rule and the default synthesis copies it into the handle. Types with
//! secondary lookups (users, commits), subtypes (transactions) or no backing objects at
//! all (magic) have their own handlers.

pub mod builtin;
mod commit;
mod external;
mod magic;
mod object;
mod transaction;
mod user;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Handle, Phid, PhidType, Viewer};

use crate::object::ObjectMap;

pub use commit::CommitHandler;
pub use external::{LoaderFactory, ObjectHandleLoader, StaticHandleLoader, StaticLoaderFactory};
pub use magic::{MagicHandler, NO_PROJECT, UP_FOR_GRABS};
pub use object::ObjectHandler;
pub use transaction::TransactionHandler;
pub use user::UserHandler;

/// Handles keyed by PHID.
pub type HandleMap = HashMap<Phid, Handle>;

/// Built-in knowledge of how to bulk-load and format one PHID type.
#[async_trait]
pub trait TypeHandler: Send + Sync {
    /// Human-readable identifier (used in logs).
    fn name(&self) -> &'static str;

    /// Type tag this handler owns.
    fn phid_type(&self) -> PhidType;

    /// Noun used in placeholders, as in "Unknown Task".
    fn noun(&self) -> &'static str;

    /// Bulk-loads the objects of a group. Missing objects are absent from the map.
    async fn load_objects(&self, phids: &[Phid], viewer: Option<&Viewer>) -> Result<ObjectMap>;

    /// Builds one handle per PHID from the loaded objects.
    ///
    /// The default copies each object's capabilities into a complete handle and emits a
    /// placeholder when the object is absent.
    async fn synthesize_handles(
        &self,
        phids: &[Phid],
        objects: &ObjectMap,
        viewer: Option<&Viewer>,
    ) -> Result<HandleMap> {
        let _ = viewer;
        Ok(phids
            .iter()
            .map(|phid| {
                let handle = match objects.get(phid) {
                    Some(object) => object.to_handle(),
                    None => self.placeholder(phid),
                };
                (phid.clone(), handle)
            })
            .collect())
    }

    /// Placeholder for an object of this type that could not be loaded.
    fn placeholder(&self, phid: &Phid) -> Handle {
        Handle::unknown(phid.clone(), self.noun())
    }
}

/// Placeholder for a PHID whose type nothing knows how to load.
pub fn unknown_object(phid: &Phid) -> Handle {
    Handle::new(phid.clone(), "Unknown Object").with_full_name("An Unknown Object")
}
