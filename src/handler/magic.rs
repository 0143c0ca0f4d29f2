use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Handle, Phid, PhidType, Viewer};

use super::{HandleMap, TypeHandler};
use crate::object::ObjectMap;

/// Owner value of unassigned tasks.
pub const UP_FOR_GRABS: &str = "PHID-!!!!-UP-FOR-GRABS";
/// Project value of objects that belong to no project.
pub const NO_PROJECT: &str = "PHID-!!!!-NO_PROJECT";

/// Handles for reserved values that have no backing object. Never touches a store.
#[derive(Debug, Default)]
pub struct MagicHandler;

impl MagicHandler {
    fn handle(phid: &Phid) -> Handle {
        let handle = match phid.as_str() {
            UP_FOR_GRABS => {
                Handle::new(phid.clone(), "Up For Grabs").with_full_name("upforgrabs (Up For Grabs)")
            }
            NO_PROJECT => {
                Handle::new(phid.clone(), "No Project").with_full_name("noproject (No Project)")
            }
            _ => Handle::new(phid.clone(), "Foul Magicks"),
        };
        handle.completed()
    }
}

#[async_trait]
impl TypeHandler for MagicHandler {
    fn name(&self) -> &'static str {
        "magic"
    }

    fn phid_type(&self) -> PhidType {
        PhidType::MAGIC
    }

    fn noun(&self) -> &'static str {
        "Object"
    }

    async fn load_objects(&self, _phids: &[Phid], _viewer: Option<&Viewer>) -> Result<ObjectMap> {
        Ok(ObjectMap::new())
    }

    async fn synthesize_handles(
        &self,
        phids: &[Phid],
        _objects: &ObjectMap,
        _viewer: Option<&Viewer>,
    ) -> Result<HandleMap> {
        Ok(phids
            .iter()
            .map(|phid| (phid.clone(), Self::handle(phid)))
            .collect())
    }
}
