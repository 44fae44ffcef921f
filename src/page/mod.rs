//! Page types: metadata values and the file set.

mod meta;
mod store;

pub use meta::{FieldValue, PermalinkOverride};
pub use store::{Document, FileSet, Fields};
