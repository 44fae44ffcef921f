//! Permalink patterns such as `:date/:title`.
//!
//! A pattern is a path template with `:name` placeholders. Each placeholder
//! is replaced by the document field of the same name:
//!
//! | Field value | Rendered as                               |
//! |-------------|-------------------------------------------|
//! | `Date`      | the linkset's date format (`YYYY/MM/DD`)  |
//! | anything else | its text, passed through the slugifier  |
//!
//! A missing or falsy field makes the whole pattern unresolvable, and the
//! caller falls back to the source path.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

use super::Linkset;
use crate::page::{Document, FieldValue};
use crate::utils::path;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_]+)").expect("valid regex"));

/// A parsed permalink template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    template: String,
    keys: Vec<String>,
}

impl Pattern {
    pub fn parse(template: impl Into<String>) -> Self {
        let template = template.into();
        let keys = PLACEHOLDER
            .captures_iter(&template)
            .map(|caps| caps[1].to_owned())
            .collect();
        Self { template, keys }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Placeholder names in order of appearance.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Expand the pattern for `doc`.
    ///
    /// Returns `None` when the template is empty, a referenced field is
    /// missing or falsy, or the expansion normalizes to nothing.
    pub fn resolve(&self, doc: &Document, linkset: &Linkset) -> Option<String> {
        if self.template.trim().is_empty() {
            return None;
        }

        let mut values: FxHashMap<&str, String> = FxHashMap::default();
        for key in &self.keys {
            let value = doc.field(key).filter(|v| !v.is_falsy())?;
            let rendered = match value {
                FieldValue::Date(date) => linkset.date.format(date),
                other => linkset.slug.slugify(&other.to_string()),
            };
            values.insert(key.as_str(), rendered);
        }

        let expanded = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });

        let normalized = path::normalize(&expanded);
        (!normalized.is_empty()).then_some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinksetConfig, PermalinkConfig};
    use crate::utils::date::DateTimeUtc;

    fn linkset() -> Linkset {
        Linkset::from_config(&PermalinkConfig::default(), None, None).unwrap()
    }

    #[test]
    fn test_parse_keys() {
        let pattern = Pattern::parse("blog/:date/:title_2");
        assert_eq!(pattern.keys(), ["date", "title_2"]);
        assert_eq!(pattern.as_str(), "blog/:date/:title_2");
        assert!(Pattern::parse("static/path").keys().is_empty());
    }

    #[test]
    fn test_resolve_title() {
        let doc = Document::new("").with_field("title", "Hello World");
        let resolved = Pattern::parse(":title").resolve(&doc, &linkset());
        assert_eq!(resolved.as_deref(), Some("hello-world"));
    }

    #[test]
    fn test_resolve_date() {
        let doc = Document::new("")
            .with_field("title", "Post")
            .with_field("date", DateTimeUtc::from_ymd(2024, 3, 7));
        let resolved = Pattern::parse("blog/:date/:title").resolve(&doc, &linkset());
        assert_eq!(resolved.as_deref(), Some("blog/2024/03/07/post"));
    }

    #[test]
    fn test_resolve_date_from_linkset_format() {
        let config = PermalinkConfig::default();
        let blog = LinksetConfig {
            date: Some("YYYY".into()),
            ..LinksetConfig::default()
        };
        let linkset = Linkset::from_config(&config, None, Some(&blog)).unwrap();
        let doc = Document::new("").with_field("date", "2024-03-07");
        let resolved = Pattern::parse(":date").resolve(&doc, &linkset);
        assert_eq!(resolved.as_deref(), Some("2024"));
    }

    #[test]
    fn test_missing_or_falsy_field() {
        let pattern = Pattern::parse(":category/:title");
        let linkset = linkset();

        let doc = Document::new("").with_field("title", "Hello");
        assert_eq!(pattern.resolve(&doc, &linkset), None);

        let doc = doc.with_field("category", "");
        assert_eq!(pattern.resolve(&doc, &linkset), None);

        let doc = doc.with_field("category", false);
        assert_eq!(pattern.resolve(&doc, &linkset), None);
    }

    #[test]
    fn test_empty_pattern_fails() {
        let doc = Document::new("").with_field("title", "Hello");
        assert_eq!(Pattern::parse("").resolve(&doc, &linkset()), None);
    }

    #[test]
    fn test_result_is_normalized() {
        let doc = Document::new("")
            .with_field("a", "One")
            .with_field("b", "Two");
        let resolved = Pattern::parse("/x//:a/./:b/").resolve(&doc, &linkset());
        assert_eq!(resolved.as_deref(), Some("x/one/two"));
    }

    #[test]
    fn test_numbers_and_lists() {
        let doc = Document::new("")
            .with_field("n", 3.0)
            .with_field("tags", vec!["a", "b"]);
        let resolved = Pattern::parse(":n/:tags").resolve(&doc, &linkset());
        assert_eq!(resolved.as_deref(), Some("3/ab"));
    }
}
