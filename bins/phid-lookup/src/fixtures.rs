//! JSON fixture served through the in-memory stores.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use phid_handles::handler::{builtin, TypeHandler};
use phid_handles::records::{
    ArcanistProjectRecord, BlogRecord, CommitRecord, ConfigEntryRecord, FileRecord, MacroRecord,
    MailingListRecord, MockRecord, OwnersPackageRecord, PasteRecord, PostRecord, ProjectRecord,
    QuestionRecord, RepositoryRecord, RevisionRecord, TaskRecord, TransactionRecord, UserRecord,
    UserStatusRecord, WikiDocumentRecord,
};
use phid_handles::store::{MemoryStatusStore, MemoryStore};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub users: Vec<UserRecord>,
    pub user_statuses: Vec<UserStatusRecord>,
    pub files: Vec<FileRecord>,
    pub commits: Vec<CommitRecord>,
    pub repositories: Vec<RepositoryRecord>,
    pub tasks: Vec<TaskRecord>,
    pub config_entries: Vec<ConfigEntryRecord>,
    pub projects: Vec<ProjectRecord>,
    pub owners_packages: Vec<OwnersPackageRecord>,
    pub arcanist_projects: Vec<ArcanistProjectRecord>,
    pub mailing_lists: Vec<MailingListRecord>,
    pub revisions: Vec<RevisionRecord>,
    pub wiki_documents: Vec<WikiDocumentRecord>,
    pub questions: Vec<QuestionRecord>,
    pub mocks: Vec<MockRecord>,
    pub macros: Vec<MacroRecord>,
    pub pastes: Vec<PasteRecord>,
    pub blogs: Vec<BlogRecord>,
    pub posts: Vec<PostRecord>,
    pub mock_transactions: Vec<TransactionRecord>,
    pub macro_transactions: Vec<TransactionRecord>,
}

impl Fixtures {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixtures from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse fixtures from {}", path.display()))
    }

    /// One handler per built-in type, each backed by its own in-memory store.
    pub fn into_handlers(self) -> Vec<Arc<dyn TypeHandler>> {
        let files = Arc::new(MemoryStore::with_objects(self.files));
        let repositories = Arc::new(MemoryStore::with_objects(self.repositories));

        vec![
            builtin::users(
                Arc::new(MemoryStore::with_objects(self.users)),
                files.clone(),
                Arc::new(MemoryStatusStore::with_statuses(self.user_statuses)),
            ),
            builtin::commits(
                Arc::new(MemoryStore::with_objects(self.commits)),
                repositories.clone(),
            ),
            builtin::files(files),
            builtin::repositories(repositories),
            builtin::tasks(Arc::new(MemoryStore::with_objects(self.tasks))),
            builtin::config_entries(Arc::new(MemoryStore::with_objects(self.config_entries))),
            builtin::projects(Arc::new(MemoryStore::with_objects(self.projects))),
            builtin::owners_packages(Arc::new(MemoryStore::with_objects(self.owners_packages))),
            builtin::arcanist_projects(Arc::new(MemoryStore::with_objects(
                self.arcanist_projects,
            ))),
            builtin::mailing_lists(Arc::new(MemoryStore::with_objects(self.mailing_lists))),
            builtin::revisions(Arc::new(MemoryStore::with_objects(self.revisions))),
            builtin::wiki_documents(Arc::new(MemoryStore::with_objects(self.wiki_documents))),
            builtin::questions(Arc::new(MemoryStore::with_objects(self.questions))),
            builtin::mocks(Arc::new(MemoryStore::with_objects(self.mocks))),
            builtin::macros(Arc::new(MemoryStore::with_objects(self.macros))),
            builtin::pastes(Arc::new(MemoryStore::with_objects(self.pastes))),
            builtin::blogs(Arc::new(MemoryStore::with_objects(self.blogs))),
            builtin::posts(Arc::new(MemoryStore::with_objects(self.posts))),
            builtin::transactions(
                Arc::new(MemoryStore::with_objects(self.mock_transactions)),
                Arc::new(MemoryStore::with_objects(self.macro_transactions)),
            ),
        ]
    }
}
