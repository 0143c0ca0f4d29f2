use phid_types::Phid;
use serde::{Deserialize, Serialize};

use crate::impl_as_any;
use crate::object::PhidObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
}

impl PhidObject for ProjectRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/project/view/{}/", self.id))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnersPackageRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
}

impl PhidObject for OwnersPackageRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/owners/package/{}/", self.id))
    }

    impl_as_any!();
}
