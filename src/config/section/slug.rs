//! `[slug]` options for pattern values.
//!
//! # Example
//!
//! ```toml
//! [slug]
//! lower = true              # Lower-case the slug (default)
//! strict = false            # Keep only ASCII letters and digits
//! replacement = "-"         # Whitespace replacement (default "-")
//! remove = "[*+~.()'\"!:@]" # Regex of characters to drop
//! locale = "de"             # Transliteration table: da | de | nb | sv | vi
//!
//! [slug.extend]
//! "☢" = "radioactive"       # Extra character substitutions
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::slug::{SUPPORTED_LOCALES, locale_table, single_char};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Lower-case the result.
    pub lower: bool,
    /// Strip everything except ASCII alphanumerics and whitespace.
    pub strict: bool,
    /// Trim leading and trailing whitespace before joining.
    pub trim: bool,
    /// Replacement for whitespace runs.
    pub replacement: String,
    /// Regex of characters to remove (default `[*+~.()'"!:@]`).
    pub remove: Option<String>,
    /// Locale transliteration table.
    pub locale: Option<String>,
    /// Extra single-character substitutions.
    pub extend: BTreeMap<String, String>,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            lower: true,
            strict: false,
            trim: true,
            replacement: "-".into(),
            remove: None,
            locale: None,
            extend: BTreeMap::new(),
        }
    }
}

/// Field paths of a `[slug]` table, per location in the config.
pub(crate) struct SlugFields {
    pub replacement: FieldPath,
    pub remove: FieldPath,
    pub locale: FieldPath,
    pub extend: FieldPath,
}

impl SlugConfig {
    /// Fields of the top-level `[slug]` table.
    pub(crate) const FIELDS: SlugFields = SlugFields {
        replacement: FieldPath::new("slug.replacement"),
        remove: FieldPath::new("slug.remove"),
        locale: FieldPath::new("slug.locale"),
        extend: FieldPath::new("slug.extend"),
    };

    /// Fields of a `[linksets.slug]` table.
    pub(crate) const LINKSET_FIELDS: SlugFields = SlugFields {
        replacement: FieldPath::new("linksets.slug.replacement"),
        remove: FieldPath::new("linksets.slug.remove"),
        locale: FieldPath::new("linksets.slug.locale"),
        extend: FieldPath::new("linksets.slug.extend"),
    };

    pub(crate) fn validate(&self, fields: &SlugFields, diag: &mut ConfigDiagnostics) {
        if self.replacement.contains('/') {
            diag.error(
                fields.replacement,
                format!("`{}` would split the slug into directories", self.replacement),
            );
        }

        if let Some(pattern) = &self.remove
            && let Err(e) = regex::Regex::new(pattern)
        {
            diag.error(fields.remove, format!("invalid regex: {e}"));
        }

        if let Some(locale) = &self.locale
            && locale_table(locale).is_none()
        {
            diag.error_with_hint(
                fields.locale,
                format!("unknown locale `{locale}`"),
                format!("supported locales: {}", SUPPORTED_LOCALES.join(", ")),
            );
        }

        for key in self.extend.keys() {
            if single_char(key).is_none() {
                diag.error(
                    fields.extend,
                    format!("`{key}` must be a single character"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.slug.lower);
        assert!(!config.slug.strict);
        assert!(config.slug.trim);
        assert_eq!(config.slug.replacement, "-");
        assert!(config.slug.remove.is_none());
        assert!(config.slug.locale.is_none());
        assert!(config.slug.extend.is_empty());
    }

    #[test]
    fn test_parsing() {
        let config = test_parse_config(
            r#"
[slug]
lower = false
strict = true
replacement = "_"
locale = "de"

[slug.extend]
"♥" = "heart"
"#,
        );
        assert!(!config.slug.lower);
        assert!(config.slug.strict);
        assert_eq!(config.slug.replacement, "_");
        assert_eq!(config.slug.locale.as_deref(), Some("de"));
        assert_eq!(config.slug.extend.get("♥").map(String::as_str), Some("heart"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut extend = BTreeMap::new();
        extend.insert("ab".to_string(), "x".to_string());
        let slug = SlugConfig {
            replacement: "/".into(),
            remove: Some("[".into()),
            locale: Some("xx".into()),
            extend,
            ..SlugConfig::default()
        };

        let mut diag = ConfigDiagnostics::new();
        slug.validate(&SlugConfig::FIELDS, &mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["slug.replacement", "slug.remove", "slug.locale", "slug.extend"]
        );
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let mut diag = ConfigDiagnostics::new();
        SlugConfig::default().validate(&SlugConfig::FIELDS, &mut diag);
        assert!(diag.is_empty());
    }
}
