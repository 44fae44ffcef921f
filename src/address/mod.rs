//! Permalink addressing: where each document ends up.
//!
//! # Module Structure
//!
//! - [`pattern`]: `:field` templates expanded from metadata
//! - [`resolve`]: fallback from the source key, explicit overrides
//! - [`linkset`]: per-document option bundles and their selection
//! - [`family`]: files that travel with a document
//! - [`unique`]: collision handling
//! - [`relink`]: rewriting references to carried files
//! - [`conflict`]: silent collision reporting
//! - [`error`]: [`PermalinkError`]
//!
//! # Flow
//!
//! ```text
//! select linkset -> pattern | fallback -> override -> unique -> commit
//!                         \-> family -> relink -> stage
//! ```

pub mod conflict;
mod error;
pub mod family;
pub mod linkset;
pub mod pattern;
pub mod relink;
pub mod resolve;
pub mod unique;

pub use conflict::{UrlConflict, format_conflicts, print_conflicts};
pub use error::PermalinkError;
pub use family::Family;
pub use linkset::{DateFormatter, Linkset, Linksets, Slugger};
pub use pattern::Pattern;
pub use relink::relink;
pub use resolve::fallback;
pub use unique::{UniqueOptions, UniquenessStrategy, make_unique};
