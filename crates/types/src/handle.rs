//! Display-ready references to objects of any type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Phid, PhidType};

/// Textual status carried by a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleStatus {
    Open,
    Closed,
    /// User is away (from the user's current status row).
    Away,
    /// User is only sporadically available.
    Sporadic,
}

impl HandleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Away => "away",
            Self::Sporadic => "sporadic",
        }
    }
}

impl fmt::Display for HandleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform projection of an object, independent of its concrete type.
///
/// `complete` distinguishes a handle populated from a loaded object from a
/// placeholder produced for an object that could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handle {
    pub phid: Phid,
    #[serde(rename = "type")]
    pub phid_type: PhidType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HandleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<u64>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl Handle {
    /// Creates an incomplete handle; the type is taken from the PHID.
    pub fn new(phid: Phid, name: impl Into<String>) -> Self {
        let phid_type = phid.phid_type();
        Self {
            phid,
            phid_type,
            name: name.into(),
            full_name: None,
            uri: None,
            image_uri: None,
            status: None,
            title: None,
            timestamp: None,
            alternate_id: None,
            complete: false,
            disabled: false,
        }
    }

    /// Placeholder for an object of a known type that could not be loaded.
    pub fn unknown(phid: Phid, noun: &str) -> Self {
        Self::new(phid, format!("Unknown {noun}"))
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn completed(mut self) -> Self {
        self.complete = true;
        self
    }

    /// Full name when one is set, short name otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_closed(&self) -> bool {
        self.status == Some(HandleStatus::Closed)
    }
}
