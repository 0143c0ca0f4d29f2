//! PHID handle resolution.
//!
//! Turns batches of PHIDs into lightweight [`Handle`]s (display name, URI, status)
//! suitable for rendering references to objects. PHIDs are grouped by their embedded
//! type tag and each group is loaded with one bulk call to the store behind that type;
//! types owned by other components are delegated to external loaders configured by tag.
//!
//! ```rust,ignore
//! let registry = registry::from_config(&config, handlers, factories).await?;
//! let resolver = HandleResolver::with_config(Arc::new(registry), config.resolver);
//! let handles = resolver
//!     .query(["PHID-TASK-abc", "PHID-USER-def"])
//!     .with_viewer(viewer)
//!     .load_handles()
//!     .await?;
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod handler;
pub mod object;
pub mod records;
pub mod registry;
pub mod resolver;
pub mod store;

// Re-export the identifier and handle types so callers need a single dependency.
pub use phid_types::{Handle, HandleStatus, Phid, PhidType, PhidTypeError, Viewer};

pub use crate::config::{HandleConfig, ResolverConfig};
pub use crate::error::{HandleError, HandleResult};
pub use handler::{HandleMap, LoaderFactory, ObjectHandleLoader, TypeHandler};
pub use object::{ObjectMap, PhidObject};
pub use registry::{HandlerRegistry, LoaderKey};
pub use resolver::{HandleQuery, HandleResolver};
pub use store::{ObjectStore, StatusStore};
