use phid_types::{HandleStatus, Phid};
use serde::{Deserialize, Serialize};

use crate::impl_as_any;
use crate::object::PhidObject;

const QUESTION_NAME_MAX_CHARS: usize = 60;
const ELLIPSIS: char = '\u{2026}';

/// Shortens `text` to at most `max` characters, ending with an ellipsis when cut.
fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push(ELLIPSIS);
    short
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Exists,
    Deleted,
    Moved,
    Stub,
}

/// A wiki document joined with its current content row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiDocumentRecord {
    pub phid: Phid,
    pub slug: String,
    pub title: String,
    pub status: DocumentStatus,
}

impl PhidObject for WikiDocumentRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.title.clone()
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/w/{}", self.slug.trim_start_matches('/')))
    }

    fn status(&self) -> Option<HandleStatus> {
        (self.status != DocumentStatus::Exists).then_some(HandleStatus::Closed)
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub phid: Phid,
    pub id: u64,
    pub title: String,
}

impl PhidObject for QuestionRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        shorten(&self.title, QUESTION_NAME_MAX_CHARS)
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/Q{}", self.id))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
}

impl PhidObject for MockRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(format!("M{}: {}", self.id, self.name))
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/M{}", self.id))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
}

impl PhidObject for MacroRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(format!("Image Macro \"{}\"", self.name))
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/macro/view/{}/", self.id))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteRecord {
    pub phid: Phid,
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

impl PhidObject for PasteRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.title.clone()
    }

    fn full_name(&self) -> Option<String> {
        let title = if self.title.is_empty() {
            "(An Untitled Masterwork)"
        } else {
            &self.title
        };
        Some(format!("P{} {}", self.id, title))
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/P{}", self.id))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
}

impl PhidObject for BlogRecord {
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
        Some(format!("/phame/blog/view/{}/", self.id))
    }

    impl_as_any!();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub phid: Phid,
    pub id: u64,
    pub title: String,
}

impl PhidObject for PostRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.title.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/phame/post/view/{}/", self.id))
    }

    impl_as_any!();
}

/// An edit applied to some other object; its PHID carries the object's type as subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub phid: Phid,
    pub id: u64,
    pub object_phid: Phid,
    pub author_phid: Phid,
    pub date_created: i64,
}

impl PhidObject for TransactionRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        format!("Transaction {}", self.id)
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.date_created)
    }

    impl_as_any!();
}
