//! Linkset resolution and selection.
//!
//! Configuration linksets are sparse: every option they leave unset comes
//! from the default linkset, then from the top-level options. [`Linksets`]
//! flattens that overlay once, so per-document selection is a plain scan.

use std::fmt;
use std::sync::Arc;

use super::Pattern;
use crate::config::{ConfigError, DateFn, LinksetConfig, PermalinkConfig, Relative, SlugConfig, SlugFn};
use crate::page::{Document, Fields};
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::Slugifier;

// ============================================================================
// transforms
// ============================================================================

/// Slug strategy for non-date placeholder values.
#[derive(Clone)]
pub enum Slugger {
    Builtin(Slugifier),
    Custom(SlugFn),
}

impl Slugger {
    pub fn slugify(&self, text: &str) -> String {
        match self {
            Self::Builtin(slugifier) => slugifier.slugify(text),
            Self::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for Slugger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(slugifier) => f.debug_tuple("Builtin").field(slugifier).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Date strategy for `Date` placeholder values.
#[derive(Clone)]
pub enum DateFormatter {
    Format(String),
    Custom(DateFn),
}

impl DateFormatter {
    pub fn format(&self, date: &DateTimeUtc) -> String {
        match self {
            Self::Format(pattern) => date.format(pattern),
            Self::Custom(f) => f(date),
        }
    }
}

impl fmt::Debug for DateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(pattern) => f.debug_tuple("Format").field(pattern).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ============================================================================
// overlay
// ============================================================================

#[derive(Clone, Copy)]
enum SlugSource<'a> {
    Options(&'a SlugConfig),
    Hook(&'a SlugFn),
}

#[derive(Clone, Copy)]
enum DateSource<'a> {
    Format(&'a str),
    Hook(&'a DateFn),
}

/// Effective options while walking global -> default -> matched.
#[derive(Clone, Copy)]
struct Layer<'a> {
    pattern: Option<&'a str>,
    date: DateSource<'a>,
    slug: SlugSource<'a>,
    relative: Relative,
}

impl<'a> Layer<'a> {
    fn global(config: &'a PermalinkConfig) -> Self {
        Self {
            pattern: config.pattern.as_deref(),
            date: config
                .hooks
                .date
                .as_ref()
                .map_or(DateSource::Format(&config.date), DateSource::Hook),
            slug: config
                .hooks
                .slug
                .as_ref()
                .map_or(SlugSource::Options(&config.slug), SlugSource::Hook),
            relative: config.relative,
        }
    }

    /// Options set on `linkset` win over the current layer.
    fn overlay(self, linkset: &'a LinksetConfig) -> Self {
        let date = match (&linkset.hooks.date, &linkset.date) {
            (Some(f), _) => DateSource::Hook(f),
            (None, Some(format)) => DateSource::Format(format),
            (None, None) => self.date,
        };
        let slug = match (&linkset.hooks.slug, &linkset.slug) {
            (Some(f), _) => SlugSource::Hook(f),
            (None, Some(options)) => SlugSource::Options(options),
            (None, None) => self.slug,
        };
        Self {
            pattern: linkset.pattern.as_deref().or(self.pattern),
            date,
            slug,
            relative: linkset.relative.unwrap_or(self.relative),
        }
    }

    fn build(self, rules: Fields) -> Result<Linkset, ConfigError> {
        let slug = match self.slug {
            SlugSource::Options(options) => Slugger::Builtin(Slugifier::new(options)?),
            SlugSource::Hook(f) => Slugger::Custom(Arc::clone(f)),
        };
        let date = match self.date {
            DateSource::Format(format) => DateFormatter::Format(format.to_owned()),
            DateSource::Hook(f) => DateFormatter::Custom(Arc::clone(f)),
        };
        Ok(Linkset {
            rules,
            pattern: self
                .pattern
                .filter(|p| !p.trim().is_empty())
                .map(Pattern::parse),
            date,
            slug,
            relative: self.relative,
        })
    }
}

// ============================================================================
// resolved linksets
// ============================================================================

/// A linkset with every option resolved.
#[derive(Debug, Clone)]
pub struct Linkset {
    pub rules: Fields,
    /// `None` means "derive from the source path".
    pub pattern: Option<Pattern>,
    pub date: DateFormatter,
    pub slug: Slugger,
    pub relative: Relative,
}

impl Linkset {
    /// Resolve `own` on top of `default` on top of the global options.
    pub(crate) fn from_config(
        config: &PermalinkConfig,
        default: Option<&LinksetConfig>,
        own: Option<&LinksetConfig>,
    ) -> Result<Self, ConfigError> {
        let mut layer = Layer::global(config);
        if let Some(default) = default {
            layer = layer.overlay(default);
        }
        if let Some(own) = own {
            layer = layer.overlay(own);
        }
        let rules = own.map(|l| l.rules.clone()).unwrap_or_default();
        layer.build(rules)
    }

    /// Every rule holds. A linkset without rules never matches.
    pub fn matches(&self, doc: &Document) -> bool {
        !self.rules.is_empty()
            && self
                .rules
                .iter()
                .all(|(field, expected)| doc.field(field).is_some_and(|v| v.matches(expected)))
    }
}

/// All linksets of a configuration, in declaration order.
#[derive(Debug, Clone)]
pub struct Linksets {
    linksets: Vec<Linkset>,
    fallback: Linkset,
}

impl Linksets {
    pub fn resolve(config: &PermalinkConfig) -> Result<Self, ConfigError> {
        let default = config.linksets.iter().find(|l| l.is_default);

        let linksets = config
            .linksets
            .iter()
            .map(|own| Linkset::from_config(config, default, Some(own)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            linksets,
            fallback: Linkset::from_config(config, default, None)?,
        })
    }

    /// First linkset whose rules match `doc`, else the default.
    pub fn select(&self, doc: &Document) -> &Linkset {
        self.linksets
            .iter()
            .find(|linkset| linkset.matches(doc))
            .unwrap_or(&self.fallback)
    }

    /// Options used when no linkset matches.
    #[inline]
    pub fn fallback(&self) -> &Linkset {
        &self.fallback
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.linksets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.linksets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::page::FieldValue;

    fn blog_doc() -> Document {
        Document::new("")
            .with_field("collection", "blog")
            .with_field("tags", vec!["rust", "web"])
            .with_field("title", "Hello World")
    }

    #[test]
    fn test_first_match_wins() {
        let config = test_parse_config(
            r#"
[[linksets]]
match = { collection = "blog" }
pattern = "blog/:title"

[[linksets]]
match = { tags = "rust" }
pattern = "rust/:title"
"#,
        );
        let linksets = Linksets::resolve(&config).unwrap();
        let selected = linksets.select(&blog_doc());
        assert_eq!(selected.pattern.as_ref().map(Pattern::as_str), Some("blog/:title"));

        let rust_only = Document::new("").with_field("tags", vec!["rust"]);
        let selected = linksets.select(&rust_only);
        assert_eq!(selected.pattern.as_ref().map(Pattern::as_str), Some("rust/:title"));
    }

    #[test]
    fn test_all_rules_must_hold() {
        let config = test_parse_config(
            r#"
[[linksets]]
match = { collection = "blog", draft = true }
pattern = "drafts/:title"
"#,
        );
        let linksets = Linksets::resolve(&config).unwrap();
        assert!(linksets.select(&blog_doc()).pattern.is_none());
        assert!(linksets.select(&blog_doc().with_field("draft", true)).pattern.is_some());
    }

    #[test]
    fn test_text_substring_match() {
        let linkset = Linkset::from_config(
            &PermalinkConfig::default(),
            None,
            Some(&LinksetConfig::default().matching("collection", "blo")),
        )
        .unwrap();
        assert!(linkset.matches(&blog_doc()));
        assert!(!linkset.matches(&Document::new("")));
    }

    #[test]
    fn test_empty_rules_never_match() {
        let linkset = Linkset::from_config(
            &PermalinkConfig::default(),
            None,
            Some(&LinksetConfig::default().with_pattern(":title")),
        )
        .unwrap();
        assert!(!linkset.matches(&blog_doc()));
    }

    #[test]
    fn test_overlay_order() {
        let config = test_parse_config(
            r#"
pattern = ":title"
date = "YYYY"
relative = true

[[linksets]]
match = { collection = "blog" }
date = "MM"

[[linksets]]
is_default = true
pattern = "posts/:title"
relative = "folder"
"#,
        );
        let linksets = Linksets::resolve(&config).unwrap();
        let date = DateTimeUtc::from_ymd(2024, 3, 7);

        // Matched: own date, default pattern and relative
        let blog = linksets.select(&blog_doc());
        assert_eq!(blog.date.format(&date), "03");
        assert_eq!(blog.pattern.as_ref().map(Pattern::as_str), Some("posts/:title"));
        assert_eq!(blog.relative, Relative::Folder);

        // Unmatched: default linkset, then global date
        let other = linksets.select(&Document::new(""));
        assert_eq!(other.date.format(&date), "2024");
        assert_eq!(other.relative, Relative::Folder);
        assert!(other.rules.is_empty());
    }

    #[test]
    fn test_global_options_without_default() {
        let config = test_parse_config("pattern = \":title\"\n[slug]\nreplacement = \"_\"");
        let linksets = Linksets::resolve(&config).unwrap();
        let fallback = linksets.select(&blog_doc());
        assert_eq!(fallback.slug.slugify("Hello World"), "hello_world");
        assert!(linksets.is_empty());
    }

    #[test]
    fn test_hooks_override_options() {
        let config = PermalinkConfig::default()
            .with_slug_fn(|s| s.to_uppercase())
            .with_linkset(
                LinksetConfig::default()
                    .matching("collection", "blog")
                    .with_date_fn(|d| format!("y{}", d.year)),
            );
        let linksets = Linksets::resolve(&config).unwrap();
        let blog = linksets.select(&blog_doc());
        assert_eq!(blog.slug.slugify("abc"), "ABC");
        assert_eq!(blog.date.format(&DateTimeUtc::from_ymd(2020, 1, 1)), "y2020");

        // Linkset slug options beat an inherited slug hook
        let config = PermalinkConfig::default()
            .with_slug_fn(|s| s.to_uppercase())
            .with_linkset(LinksetConfig {
                slug: Some(SlugConfig::default()),
                ..LinksetConfig::default().matching("collection", "blog")
            });
        let linksets = Linksets::resolve(&config).unwrap();
        assert_eq!(linksets.select(&blog_doc()).slug.slugify("A B"), "a-b");
        assert_eq!(linksets.fallback().slug.slugify("a b"), "A B");
    }

    #[test]
    fn test_invalid_remove_regex() {
        let config = test_parse_config("[slug]\nremove = \"[\"");
        assert!(matches!(
            Linksets::resolve(&config),
            Err(ConfigError::Pattern(_))
        ));
    }

    #[test]
    fn test_list_rule_matches_element() {
        let linkset = Linkset::from_config(
            &PermalinkConfig::default(),
            None,
            Some(&LinksetConfig::default().matching("tags", FieldValue::from("web"))),
        )
        .unwrap();
        assert!(linkset.matches(&blog_doc()));
    }
}
