use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use phid_types::{Phid, PhidType, Viewer};

use super::{HandleMap, TypeHandler};
use crate::classify::dedup;
use crate::object::{erase, ObjectMap};
use crate::records::{FileRecord, UserRecord, DEFAULT_PROFILE_IMAGE_URI};
use crate::store::{ObjectStore, StatusStore};

/// Users need two secondary lookups on top of the user records: profile images and
/// current availability. Each is one bulk call for the whole group.
pub struct UserHandler {
    users: Arc<dyn ObjectStore<UserRecord>>,
    images: Arc<dyn ObjectStore<FileRecord>>,
    statuses: Arc<dyn StatusStore>,
}

impl UserHandler {
    pub fn new(
        users: Arc<dyn ObjectStore<UserRecord>>,
        images: Arc<dyn ObjectStore<FileRecord>>,
        statuses: Arc<dyn StatusStore>,
    ) -> Self {
        Self {
            users,
            images,
            statuses,
        }
    }

    async fn load_image_uris(&self, image_phids: Vec<Phid>) -> Result<HashMap<Phid, String>> {
        if image_phids.is_empty() {
            return Ok(HashMap::new());
        }
        let files = self.images.load_all(&image_phids).await?;
        Ok(files
            .into_iter()
            .map(|(phid, file)| (phid, file.best_uri))
            .collect())
    }
}

#[async_trait]
impl TypeHandler for UserHandler {
    fn name(&self) -> &'static str {
        "user"
    }

    fn phid_type(&self) -> PhidType {
        PhidType::USER
    }

    fn noun(&self) -> &'static str {
        "User"
    }

    async fn load_objects(&self, phids: &[Phid], _viewer: Option<&Viewer>) -> Result<ObjectMap> {
        Ok(erase(self.users.load_all(phids).await?))
    }

    async fn synthesize_handles(
        &self,
        phids: &[Phid],
        objects: &ObjectMap,
        viewer: Option<&Viewer>,
    ) -> Result<HandleMap> {
        let image_phids = dedup(
            phids
                .iter()
                .filter_map(|phid| objects.get(phid))
                .filter_map(|user| user.image_phid().cloned()),
        );
        let images = self.load_image_uris(image_phids).await?;
        let statuses = self.statuses.load_current_statuses(phids).await?;

        tracing::trace!(
            target: "phid_handles::handler",
            users = objects.len(),
            images = images.len(),
            statuses = statuses.len(),
            "loaded user extras"
        );

        let mut handles = HashMap::with_capacity(phids.len());
        for phid in phids {
            let Some(user) = objects.get(phid) else {
                handles.insert(phid.clone(), self.placeholder(phid));
                continue;
            };

            let mut handle = user.to_handle();
            handle.image_uri = Some(
                user.image_phid()
                    .and_then(|image| images.get(image))
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE_URI.to_string()),
            );
            if let Some(status) = statuses.get(phid) {
                handle.status = Some(status.text_status());
                if let Some(viewer) = viewer {
                    handle.title = Some(status.terse_summary(viewer));
                }
            }
            handles.insert(phid.clone(), handle);
        }
        Ok(handles)
    }
}
