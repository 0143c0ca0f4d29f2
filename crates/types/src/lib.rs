//! Identifier and handle types shared by the handle resolution engine and its collaborators.

mod handle;
mod phid;
mod viewer;

pub use handle::{Handle, HandleStatus};
pub use phid::{Phid, PhidType, PhidTypeError};
pub use viewer::Viewer;
