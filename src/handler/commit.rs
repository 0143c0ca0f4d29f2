use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Phid, PhidType, Viewer};

use super::TypeHandler;
use crate::classify::dedup;
use crate::object::{ObjectMap, PhidObject};
use crate::records::{CommitRecord, RepositoryRecord, ResolvedCommit};
use crate::store::ObjectStore;

/// Commits are named after their repository, so the group's repositories are loaded
/// in a second bulk call and joined onto each commit.
pub struct CommitHandler {
    commits: Arc<dyn ObjectStore<CommitRecord>>,
    repositories: Arc<dyn ObjectStore<RepositoryRecord>>,
}

impl CommitHandler {
    pub fn new(
        commits: Arc<dyn ObjectStore<CommitRecord>>,
        repositories: Arc<dyn ObjectStore<RepositoryRecord>>,
    ) -> Self {
        Self {
            commits,
            repositories,
        }
    }
}

#[async_trait]
impl TypeHandler for CommitHandler {
    fn name(&self) -> &'static str {
        "commit"
    }

    fn phid_type(&self) -> PhidType {
        PhidType::COMMIT
    }

    fn noun(&self) -> &'static str {
        "Commit"
    }

    async fn load_objects(&self, phids: &[Phid], _viewer: Option<&Viewer>) -> Result<ObjectMap> {
        let commits = self.commits.load_all(phids).await?;

        let repository_phids = dedup(commits.values().map(|commit| commit.repository_phid.clone()));
        let repositories = if repository_phids.is_empty() {
            HashMap::new()
        } else {
            self.repositories.load_all(&repository_phids).await?
        };

        Ok(commits
            .into_iter()
            .map(|(phid, commit)| {
                let repository = repositories.get(&commit.repository_phid).cloned();
                if repository.is_none() {
                    tracing::debug!(
                        target: "phid_handles::handler",
                        commit = %phid,
                        repository = %commit.repository_phid,
                        "commit repository not found"
                    );
                }
                let resolved = ResolvedCommit { commit, repository };
                (phid, Arc::new(resolved) as Arc<dyn PhidObject>)
            })
            .collect())
    }
}
