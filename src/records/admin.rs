//! Installation-level objects: config entries and mailing lists.

use phid_types::Phid;
use serde::{Deserialize, Serialize};

use crate::impl_as_any;
use crate::object::PhidObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingListRecord {
    pub phid: Phid,
    pub name: String,
    pub uri: String,
}

impl PhidObject for MailingListRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn uri(&self) -> Option<String> {
        Some(self.uri.clone())
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntryRecord {
    pub phid: Phid,
    pub key: String,
}

impl PhidObject for ConfigEntryRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.key.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(self.key.clone())
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/config/edit/{}", self.key))
    }

    impl_as_any!();
}
