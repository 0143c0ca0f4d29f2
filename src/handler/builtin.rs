//! Constructors for the built-in type handlers.
//!
//! Each function wires the store(s) for one type into a handler with that type's
//! name, placeholder noun and scoping.

use std::sync::Arc;

use phid_types::PhidType;

use super::{
    CommitHandler, MagicHandler, ObjectHandler, TransactionHandler, TypeHandler, UserHandler,
};
use crate::records::{
    ArcanistProjectRecord, BlogRecord, CommitRecord, ConfigEntryRecord, FileRecord,
    MacroRecord, MailingListRecord, MockRecord, OwnersPackageRecord, PasteRecord, PostRecord,
    ProjectRecord, QuestionRecord, RepositoryRecord, RevisionRecord, TaskRecord,
    TransactionRecord, UserRecord, WikiDocumentRecord,
};
use crate::store::{ObjectStore, StatusStore};

pub fn users(
    users: Arc<dyn ObjectStore<UserRecord>>,
    images: Arc<dyn ObjectStore<FileRecord>>,
    statuses: Arc<dyn StatusStore>,
) -> Arc<dyn TypeHandler> {
    Arc::new(UserHandler::new(users, images, statuses))
}

pub fn commits(
    commits: Arc<dyn ObjectStore<CommitRecord>>,
    repositories: Arc<dyn ObjectStore<RepositoryRecord>>,
) -> Arc<dyn TypeHandler> {
    Arc::new(CommitHandler::new(commits, repositories))
}

pub fn tasks(store: Arc<dyn ObjectStore<TaskRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("task", PhidType::TASK, "Task", store))
}

pub fn config_entries(store: Arc<dyn ObjectStore<ConfigEntryRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new(
        "config",
        PhidType::CONFIG,
        "Config Entry",
        store,
    ))
}

pub fn files(store: Arc<dyn ObjectStore<FileRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("file", PhidType::FILE, "File", store))
}

pub fn projects(store: Arc<dyn ObjectStore<ProjectRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("project", PhidType::PROJECT, "Project", store).viewer_scoped())
}

pub fn repositories(store: Arc<dyn ObjectStore<RepositoryRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new(
        "repository",
        PhidType::REPOSITORY,
        "Repository",
        store,
    ))
}

pub fn owners_packages(store: Arc<dyn ObjectStore<OwnersPackageRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new(
        "owners-package",
        PhidType::OWNERS_PACKAGE,
        "Package",
        store,
    ))
}

pub fn arcanist_projects(
    store: Arc<dyn ObjectStore<ArcanistProjectRecord>>,
) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new(
        "arcanist-project",
        PhidType::ARCANIST_PROJECT,
        "Arcanist Project",
        store,
    ))
}

pub fn mailing_lists(store: Arc<dyn ObjectStore<MailingListRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new(
        "mailing-list",
        PhidType::MAILING_LIST,
        "Mailing List",
        store,
    ))
}

pub fn revisions(store: Arc<dyn ObjectStore<RevisionRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new(
        "revision",
        PhidType::REVISION,
        "Revision",
        store,
    ))
}

pub fn wiki_documents(store: Arc<dyn ObjectStore<WikiDocumentRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("wiki", PhidType::WIKI, "Document", store))
}

pub fn questions(store: Arc<dyn ObjectStore<QuestionRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(
        ObjectHandler::new("question", PhidType::QUESTION, "Ponder Question", store)
            .viewer_scoped(),
    )
}

pub fn mocks(store: Arc<dyn ObjectStore<MockRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("mock", PhidType::MOCK, "Mock", store).viewer_scoped())
}

pub fn macros(store: Arc<dyn ObjectStore<MacroRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("macro", PhidType::MACRO, "Macro", store))
}

pub fn pastes(store: Arc<dyn ObjectStore<PasteRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("paste", PhidType::PASTE, "Paste", store).viewer_scoped())
}

pub fn blogs(store: Arc<dyn ObjectStore<BlogRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("blog", PhidType::BLOG, "Blog", store).viewer_scoped())
}

pub fn posts(store: Arc<dyn ObjectStore<PostRecord>>) -> Arc<dyn TypeHandler> {
    Arc::new(ObjectHandler::new("post", PhidType::POST, "Post", store).viewer_scoped())
}

/// Transaction handler with a store for mock and macro transactions.
pub fn transactions(
    mocks: Arc<dyn ObjectStore<TransactionRecord>>,
    macros: Arc<dyn ObjectStore<TransactionRecord>>,
) -> Arc<dyn TypeHandler> {
    Arc::new(
        TransactionHandler::new()
            .with_subtype(PhidType::MOCK, mocks)
            .with_subtype(PhidType::MACRO, macros),
    )
}

pub fn magic() -> Arc<dyn TypeHandler> {
    Arc::new(MagicHandler)
}
