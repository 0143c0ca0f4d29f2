//! Maniphest tasks.

use phid_types::{HandleStatus, Phid};
use serde::{Deserialize, Serialize};

use crate::impl_as_any;
use crate::object::PhidObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Resolved,
    WontFix,
    Invalid,
    Duplicate,
    Spite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub phid: Phid,
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
}

impl PhidObject for TaskRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.title.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(format!("T{}: {}", self.id, self.title))
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/T{}", self.id))
    }

    fn alternate_id(&self) -> Option<u64> {
        Some(self.id)
    }

    fn status(&self) -> Option<HandleStatus> {
        (self.status != TaskStatus::Open).then_some(HandleStatus::Closed)
    }

    impl_as_any!();
}
