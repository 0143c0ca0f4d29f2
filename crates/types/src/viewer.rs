use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::Phid;

/// Identity on whose behalf handles are resolved.
///
/// Only forwarded to collaborators; the engine itself makes no policy decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub phid: Phid,
    pub timezone: FixedOffset,
}

impl Viewer {
    pub fn new(phid: impl Into<Phid>) -> Self {
        Self {
            phid: phid.into(),
            timezone: Utc.fix(),
        }
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Formats an epoch as a short date (`Oct 15 2026`) in the viewer's timezone.
    pub fn format_date(&self, epoch: i64) -> Option<String> {
        let date = DateTime::<Utc>::from_timestamp(epoch, 0)?;
        Some(date.with_timezone(&self.timezone).format("%b %-d %Y").to_string())
    }
}
