//! Capability interface implemented by every domain object that can back a handle.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use phid_types::{Handle, HandleStatus, Phid};

/// Loaded objects keyed by PHID, type-erased so groups of different types can be merged.
pub type ObjectMap = HashMap<Phid, Arc<dyn PhidObject>>;

/// Read-only view of a loaded object, exposing what a handle needs.
///
/// Each record type carries its own formatting rule in its impl. Only `phid` and
/// `short_name` are required; the rest default to "not provided".
pub trait PhidObject: Debug + Send + Sync + 'static {
    fn phid(&self) -> &Phid;

    fn short_name(&self) -> String;

    fn full_name(&self) -> Option<String> {
        None
    }

    fn uri(&self) -> Option<String> {
        None
    }

    fn image_uri(&self) -> Option<String> {
        None
    }

    /// PHID of an image that must be looked up separately (profile pictures).
    fn image_phid(&self) -> Option<&Phid> {
        None
    }

    fn status(&self) -> Option<HandleStatus> {
        None
    }

    /// Numeric id used in short links (`T42`, `D7`).
    fn alternate_id(&self) -> Option<u64> {
        None
    }

    fn timestamp(&self) -> Option<i64> {
        None
    }

    fn is_disabled(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn PhidObject {
    /// Tries to view the object as a concrete record type.
    pub fn downcast_ref<T: PhidObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Builds a complete handle from this object's capabilities.
    pub fn to_handle(&self) -> Handle {
        let mut handle = Handle::new(self.phid().clone(), self.short_name());
        handle.full_name = self.full_name();
        handle.uri = self.uri();
        handle.image_uri = self.image_uri();
        handle.status = self.status();
        handle.alternate_id = self.alternate_id();
        handle.timestamp = self.timestamp();
        handle.disabled = self.is_disabled();
        handle.complete = true;
        handle
    }
}

/// Erases a typed store result into an [`ObjectMap`].
pub fn erase<T: PhidObject>(objects: HashMap<Phid, T>) -> ObjectMap {
    objects
        .into_iter()
        .map(|(phid, object)| (phid, Arc::new(object) as Arc<dyn PhidObject>))
        .collect()
}

/// Implements `as_any` for a record type.
#[macro_export]
macro_rules! impl_as_any {
    () => {
        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }
    };
}
