use phid_types::{HandleStatus, Phid, Viewer};
use serde::{Deserialize, Serialize};

use crate::impl_as_any;
use crate::object::PhidObject;

/// Served when a user has no profile image, or the image cannot be found.
pub const DEFAULT_PROFILE_IMAGE_URI: &str = "/rsrc/image/avatar.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub phid: Phid,
    pub id: u64,
    pub username: String,
    pub real_name: String,
    #[serde(default)]
    pub profile_image_phid: Option<Phid>,
    #[serde(default)]
    pub is_disabled: bool,
}

impl PhidObject for UserRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.username.clone()
    }

    fn full_name(&self) -> Option<String> {
        Some(format!("{} ({})", self.username, self.real_name))
    }

    fn uri(&self) -> Option<String> {
        Some(format!("/p/{}/", self.username))
    }

    fn image_phid(&self) -> Option<&Phid> {
        self.profile_image_phid.as_ref()
    }

    fn alternate_id(&self) -> Option<u64> {
        Some(self.id)
    }

    fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    impl_as_any!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Away,
    Sporadic,
}

/// A user's current availability, valid between two epochs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatusRecord {
    pub user_phid: Phid,
    pub availability: Availability,
    pub date_from: i64,
    pub date_to: i64,
    #[serde(default)]
    pub description: Option<String>,
}

impl UserStatusRecord {
    pub fn text_status(&self) -> HandleStatus {
        match self.availability {
            Availability::Away => HandleStatus::Away,
            Availability::Sporadic => HandleStatus::Sporadic,
        }
    }

    /// One-line summary such as `Away until Oct 15 2026`, dated in the viewer's timezone.
    pub fn terse_summary(&self, viewer: &Viewer) -> String {
        let label = match self.availability {
            Availability::Away => "Away",
            Availability::Sporadic => "Sporadic",
        };
        match viewer.format_date(self.date_to) {
            Some(until) => format!("{label} until {until}"),
            None => label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub phid: Phid,
    pub id: u64,
    pub name: String,
    pub mime_type: String,
    /// Best URI to serve the file from, as computed by the file store.
    pub best_uri: String,
}

impl FileRecord {
    pub fn is_viewable_image(&self) -> bool {
        matches!(
            self.mime_type.as_str(),
            "image/png" | "image/jpeg" | "image/jpg" | "image/gif"
        )
    }
}

impl PhidObject for FileRecord {
    fn phid(&self) -> &Phid {
        &self.phid
    }

    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn uri(&self) -> Option<String> {
        Some(self.best_uri.clone())
    }

    fn image_uri(&self) -> Option<String> {
        self.is_viewable_image().then(|| self.best_uri.clone())
    }

    impl_as_any!();
}
