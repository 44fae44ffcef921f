//! `[[linksets]]`: per-document permalink options selected by metadata.
//!
//! # Example
//!
//! ```toml
//! [[linksets]]
//! match = { collection = "blog" }   # every rule must hold
//! pattern = "blog/:date/:title"
//! date = "YYYY"
//!
//! [[linksets]]
//! match = { tags = "rust" }         # list fields match by element
//! pattern = "rust/:title"
//! relative = "folder"
//!
//! [[linksets]]
//! is_default = true                 # used when nothing matches
//! pattern = ":title"
//! ```
//!
//! Options a linkset leaves unset fall back to the default linkset, then to
//! the top-level options.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Hooks, Relative, SlugConfig};
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::page::Fields;
use crate::utils::date::DateTimeUtc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksetConfig {
    /// Field -> expected value. Empty means "never selected by matching".
    #[serde(rename = "match")]
    pub rules: Fields,
    /// Permalink pattern, e.g. `:date/:title`.
    pub pattern: Option<String>,
    /// Date format for `Date` fields.
    pub date: Option<String>,
    /// Slug options for other fields.
    pub slug: Option<SlugConfig>,
    /// Family policy.
    pub relative: Option<Relative>,
    /// Use this linkset when no other one matches.
    pub is_default: bool,
    #[serde(skip)]
    pub hooks: Hooks,
}

impl LinksetConfig {
    pub const FIELDS: LinksetFields = LinksetFields {
        rules: FieldPath::new("linksets.match"),
        date: FieldPath::new("linksets.date"),
        is_default: FieldPath::new("linksets.is_default"),
    };

    /// Builder: add a match rule.
    pub fn matching(
        mut self,
        field: impl Into<String>,
        expected: impl Into<crate::page::FieldValue>,
    ) -> Self {
        self.rules.insert(field.into(), expected.into());
        self
    }

    /// Builder: set the pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Builder: replace the slugifier for documents of this linkset.
    pub fn with_slug_fn(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.hooks.slug = Some(Arc::new(f));
        self
    }

    /// Builder: replace the date format for documents of this linkset.
    pub fn with_date_fn(
        mut self,
        f: impl Fn(&DateTimeUtc) -> String + Send + Sync + 'static,
    ) -> Self {
        self.hooks.date = Some(Arc::new(f));
        self
    }

    /// Validate the linkset at `index` (zero-based).
    pub(crate) fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        let position = index + 1;

        if self.rules.is_empty() && !self.is_default {
            diag.hint(
                Self::FIELDS.rules,
                format!("linkset #{position} has no match rules and is never selected"),
            );
        }

        if let Some(date) = &self.date
            && date.trim().is_empty()
        {
            diag.error(
                Self::FIELDS.date,
                format!("linkset #{position}: date format must not be empty"),
            );
        }

        if let Some(slug) = &self.slug {
            slug.validate(&SlugConfig::LINKSET_FIELDS, diag);
        }
    }
}

pub struct LinksetFields {
    pub rules: FieldPath,
    pub date: FieldPath,
    pub is_default: FieldPath,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::page::FieldValue;

    #[test]
    fn test_parsing() {
        let config = test_parse_config(
            r#"
[[linksets]]
match = { collection = "blog", featured = true }
pattern = "blog/:title"
date = "YYYY"
relative = "folder"

[linksets.slug]
replacement = "_"

[[linksets]]
is_default = true
pattern = ":title"
"#,
        );

        assert_eq!(config.linksets.len(), 2);
        let blog = &config.linksets[0];
        assert_eq!(
            blog.rules.get("collection"),
            Some(&FieldValue::from("blog"))
        );
        assert_eq!(blog.rules.get("featured"), Some(&FieldValue::Bool(true)));
        assert_eq!(blog.pattern.as_deref(), Some("blog/:title"));
        assert_eq!(blog.date.as_deref(), Some("YYYY"));
        assert_eq!(blog.relative, Some(Relative::Folder));
        assert_eq!(blog.slug.as_ref().map(|s| s.replacement.as_str()), Some("_"));
        assert!(!blog.is_default);

        let fallback = &config.linksets[1];
        assert!(fallback.is_default);
        assert!(fallback.rules.is_empty());
        assert!(fallback.relative.is_none());
    }

    #[test]
    fn test_validate_empty_date() {
        let linkset = LinksetConfig {
            date: Some(" ".into()),
            is_default: true,
            ..LinksetConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        linkset.validate(0, &mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "linksets.date");
    }

    #[test]
    fn test_builders() {
        let linkset = LinksetConfig::default()
            .matching("collection", "blog")
            .with_pattern("blog/:title")
            .with_slug_fn(|s| s.to_uppercase());
        assert_eq!(linkset.rules.len(), 1);
        assert_eq!(linkset.pattern.as_deref(), Some("blog/:title"));
        assert!(linkset.hooks.slug.is_some());
        assert!(linkset.hooks.date.is_none());
    }
}
