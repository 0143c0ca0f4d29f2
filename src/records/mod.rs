//! Domain records served by the collaborator stores for the built-in types.
//!
//! Each record implements [`PhidObject`](crate::object::PhidObject); its handle
//! formatting rule (names, URIs, status) lives in that impl.

mod admin;
mod content;
mod project;
mod repository;
mod task;
mod user;

pub use admin::{ConfigEntryRecord, MailingListRecord};
pub use content::{
    BlogRecord, DocumentStatus, MacroRecord, MockRecord, PasteRecord, PostRecord, QuestionRecord,
    TransactionRecord, WikiDocumentRecord,
};
pub use project::{OwnersPackageRecord, ProjectRecord};
pub use repository::{
    ArcanistProjectRecord, CommitRecord, RepositoryRecord, ResolvedCommit, RevisionRecord,
    RevisionStatus, Vcs,
};
pub use task::{TaskRecord, TaskStatus};
pub use user::{
    Availability, FileRecord, UserRecord, UserStatusRecord, DEFAULT_PROFILE_IMAGE_URI,
};
