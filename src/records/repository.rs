use phid_types::{HandleStatus, Phid};
use serde::{Deserialize, Serialize};

use crate::impl_as_any;
use crate::object::PhidObject;

/// Length of the abbreviated hash used in commit names for distributed VCSes.
const SHORT_HASH_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vcs {
    Git,
    Mercurial,
    Subversion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub phid: Phid,
    pub id: u64,
    pub callsign: String,
    pub name: String,
    pub vcs: Vcs,
}

impl RepositoryRecord {
    /// Short display name of a commit in this repository, e.g. `rXabcdef012345`.
    pub fn format_commit_name(&self, identifier: &str) -> String {
        match self.vcs {
            Vcs::Subversion => format!("r{}{}", self.callsign, identifier),
            Vcs::Git | Vcs::Mercurial => {
                let short: String = identifier.chars().take(SHORT_HASH_LEN).collect();
                format!("r{}{}", self.callsign, short)
            }
        }
    }
}

impl PhidObject for RepositoryRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.callsign.clone()
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/diffusion/{}/", self.callsign))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub phid: Phid,
    pub repository_phid: Phid,
    /// Hash or revision number, depending on the VCS.
    pub commit_identifier: String,
    pub epoch: i64,
}

impl PhidObject for CommitRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    /// Bare identifier; handles use [`ResolvedCommit`], which knows the repository.
    fn short_name(&self) -> String {
        self.commit_identifier.clone()
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.epoch)
    }

    impl_as_any!();
}

/// A commit joined with its repository, which may have been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommit {
    pub commit: CommitRecord,
    pub repository: Option<RepositoryRecord>,
}

impl PhidObject for ResolvedCommit {
    fn phid(&self) -> &Phid {
        &self.commit.phid
    }

    fn short_name(&self) -> String {
        match &self.repository {
            Some(repository) => repository.format_commit_name(&self.commit.commit_identifier),
            None => format!("Commit {}", self.commit.commit_identifier),
        }
    }

    fn full_name(&self) -> Option<String> {
        let repository = self.repository.as_ref()?;
        Some(format!(
            "r{}{}",
            repository.callsign, self.commit.commit_identifier
        ))
    }

    fn uri(&self) -> Option<String> {
        self.full_name().map(|name| format!("/{name}"))
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.commit.epoch)
    }

    impl_as_any!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionStatus {
    NeedsReview,
    NeedsRevision,
    Accepted,
    Closed,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    pub phid: Phid,
    pub id: u64,
    pub title: String,
    pub status: RevisionStatus,
}

impl PhidObject for RevisionRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.title.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(format!("D{}: {}", self.id, self.title))
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/D{}", self.id))
    }

    fn status(&self) -> Option<HandleStatus> {
        matches!(
            self.status,
            RevisionStatus::Closed | RevisionStatus::Abandoned
        )
        .then_some(HandleStatus::Closed)
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcanistProjectRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
}

impl PhidObject for ArcanistProjectRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    impl_as_any!();
}
