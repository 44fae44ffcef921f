//! Utility modules shared across the crate.
//!
//! - [`date`]: Date parsing and formatting
//! - [`path`]: Posix key helpers
//! - [`plural`]: Pluralization helpers
//! - [`slug`]: Slugification

pub mod date;
pub mod path;
pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
