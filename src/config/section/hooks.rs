//! Caller-supplied transforms that replace built-in behavior.
//!
//! Hooks cannot be expressed in TOML; attach them with the builder methods
//! on [`PermalinkConfig`](crate::config::PermalinkConfig) and
//! [`LinksetConfig`](super::LinksetConfig).

use std::fmt;
use std::sync::Arc;

use crate::address::{PermalinkError, UniqueOptions};
use crate::page::FileSet;
use crate::utils::date::DateTimeUtc;

/// Replaces the slugifier.
pub type SlugFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Replaces the date format string.
pub type DateFn = Arc<dyn Fn(&DateTimeUtc) -> String + Send + Sync>;

/// Replaces the uniqueness resolver.
///
/// Arguments: candidate directory, current file set, source key, options.
/// Returns the final key.
pub type UniqueFn = Arc<
    dyn Fn(&str, &FileSet, &str, &UniqueOptions) -> Result<String, PermalinkError> + Send + Sync,
>;

#[derive(Clone, Default)]
pub struct Hooks {
    pub slug: Option<SlugFn>,
    pub date: Option<DateFn>,
    pub unique: Option<UniqueFn>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("slug", &self.slug.is_some())
            .field("date", &self.date.is_some())
            .field("unique", &self.unique.is_some())
            .finish()
    }
}
