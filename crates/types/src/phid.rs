//! PHIDs and the type tags embedded in them.
//!
//! A PHID looks like `PHID-TASK-abcdefghijklmnopqrst`. The four characters after the
//! `PHID-` prefix are the type tag. Transactions carry a second tag naming the kind of
//! object they apply to: `PHID-XACT-MOCK-abcdefghijklmn`.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const PREFIX: &str = "PHID-";
const TAG_LEN: usize = 4;

/// Error returned when a type tag cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhidTypeError {
    #[error("type tag '{0}' must be exactly four ASCII characters other than '-'")]
    InvalidTag(String),
}

/// Opaque global object identifier.
///
/// Construction never fails: a malformed PHID is still a PHID, it just classifies
/// under [`PhidType::UNKNOWN`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phid(String);

impl Phid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type tag embedded in this PHID, or [`PhidType::UNKNOWN`] if it is malformed.
    pub fn phid_type(&self) -> PhidType {
        tag_at(&self.0, PREFIX.len()).unwrap_or(PhidType::UNKNOWN)
    }

    /// Second-level tag of a transaction PHID.
    ///
    /// Returns `None` for every other type, and for transaction PHIDs that do not
    /// carry a well-formed subtype.
    pub fn subtype(&self) -> Option<PhidType> {
        if self.phid_type() != PhidType::TRANSACTION {
            return None;
        }
        tag_at(&self.0, PREFIX.len() + TAG_LEN + 1)
    }
}

fn tag_at(value: &str, start: usize) -> Option<PhidType> {
    if !value.starts_with(PREFIX) {
        return None;
    }
    let bytes = value.as_bytes();
    let tag = bytes.get(start..start + TAG_LEN)?;
    if bytes.get(start + TAG_LEN) != Some(&b'-') {
        return None;
    }
    PhidType::from_bytes(tag)
}

impl fmt::Debug for Phid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Phid").field(&self.0).finish()
    }
}

impl fmt::Display for Phid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Phid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Phid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Phid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Phid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Four-character type tag embedded in a PHID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhidType([u8; TAG_LEN]);

impl PhidType {
    pub const USER: Self = Self(*b"USER");
    pub const COMMIT: Self = Self(*b"CMIT");
    pub const TASK: Self = Self(*b"TASK");
    pub const CONFIG: Self = Self(*b"CONF");
    pub const FILE: Self = Self(*b"FILE");
    pub const PROJECT: Self = Self(*b"PROJ");
    pub const REPOSITORY: Self = Self(*b"REPO");
    pub const OWNERS_PACKAGE: Self = Self(*b"OPKG");
    pub const ARCANIST_PROJECT: Self = Self(*b"APRJ");
    pub const MAILING_LIST: Self = Self(*b"MLST");
    pub const REVISION: Self = Self(*b"DREV");
    pub const WIKI: Self = Self(*b"WIKI");
    pub const QUESTION: Self = Self(*b"QUES");
    pub const MOCK: Self = Self(*b"MOCK");
    pub const MACRO: Self = Self(*b"MCRO");
    pub const PASTE: Self = Self(*b"PSTE");
    pub const BLOG: Self = Self(*b"BLOG");
    pub const POST: Self = Self(*b"POST");
    pub const TRANSACTION: Self = Self(*b"XACT");
    /// Values with no backing object, like the "up for grabs" owner.
    pub const MAGIC: Self = Self(*b"!!!!");
    /// Tag assigned to PHIDs whose type cannot be extracted.
    pub const UNKNOWN: Self = Self(*b"????");

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let tag: [u8; TAG_LEN] = bytes.try_into().ok()?;
        tag.iter()
            .all(|b| b.is_ascii_graphic() && *b != b'-')
            .then_some(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever accepted into a tag.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl FromStr for PhidType {
    type Err = PhidTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or_else(|| PhidTypeError::InvalidTag(s.to_string()))
    }
}

impl fmt::Debug for PhidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhidType({})", self.as_str())
    }
}

impl fmt::Display for PhidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PhidType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PhidType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
