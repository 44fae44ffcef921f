//! URL slugification for pattern values.
//!
//! Converts raw metadata values (`"Hello World!"`) into URL-safe tokens
//! (`"hello-world"`). The transliteration table is built once per resolved
//! configuration and owned by the [`Slugifier`]; nothing here mutates shared
//! state.

use std::sync::LazyLock;

use deunicode::deunicode_char;
use regex::{NoExpand, Regex};
use rustc_hash::FxHashMap;

use crate::config::SlugConfig;

/// Character -> replacement text lookup.
pub type CharTable = FxHashMap<char, String>;

/// Locales with a built-in transliteration table.
pub const SUPPORTED_LOCALES: &[&str] = &["da", "de", "nb", "sv", "vi"];

/// Characters removed by default (after transliteration).
const DEFAULT_REMOVE: &str = r#"[*+~.()'"!:@]"#;

/// Symbols spelled out instead of dropped.
const SYMBOLS: &[(char, &str)] = &[
    ('$', "dollar"),
    ('%', "percent"),
    ('&', "and"),
    ('<', "less"),
    ('>', "greater"),
    ('|', "or"),
    ('€', "euro"),
    ('£', "pound"),
    ('¥', "yen"),
    ('©', "(c)"),
    ('®', "(r)"),
    ('™', "tm"),
    ('∞', "infinity"),
    ('♥', "love"),
];

const LOCALE_DE: &[(char, &str)] = &[
    ('Ä', "AE"),
    ('ä', "ae"),
    ('Ö', "OE"),
    ('ö', "oe"),
    ('Ü', "UE"),
    ('ü', "ue"),
    ('ß', "ss"),
];

const LOCALE_DA: &[(char, &str)] = &[
    ('Æ', "AE"),
    ('æ', "ae"),
    ('Ø', "OE"),
    ('ø', "oe"),
    ('Å', "AA"),
    ('å', "aa"),
];

const LOCALE_SV: &[(char, &str)] = &[
    ('Ä', "AE"),
    ('ä', "ae"),
    ('Å', "AA"),
    ('å', "aa"),
    ('Ö', "OE"),
    ('ö', "oe"),
];

const LOCALE_VI: &[(char, &str)] = &[('Đ', "D"), ('đ', "d")];

static DEFAULT_REMOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_REMOVE).expect("default remove pattern is valid"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Transliteration table for a locale name.
pub fn locale_table(locale: &str) -> Option<&'static [(char, &'static str)]> {
    match locale {
        "de" => Some(LOCALE_DE),
        "da" | "nb" => Some(LOCALE_DA),
        "sv" => Some(LOCALE_SV),
        "vi" => Some(LOCALE_VI),
        _ => None,
    }
}

/// Build the lookup table for a slug configuration.
///
/// Later layers win: symbols, then `extend`, then the locale table.
pub fn build_table(config: &SlugConfig) -> CharTable {
    let mut table: CharTable = SYMBOLS.iter().map(|&(c, s)| (c, s.to_owned())).collect();

    for (key, value) in &config.extend {
        if let Some(c) = single_char(key) {
            table.insert(c, value.clone());
        }
    }

    if let Some(locale) = config.locale.as_deref().and_then(locale_table) {
        table.extend(locale.iter().map(|&(c, s)| (c, s.to_owned())));
    }

    table
}

/// The only char of `s`, if it has exactly one.
pub(crate) fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Characters that survive the first filtering pass.
#[inline]
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(
            c,
            '_' | '$' | '*' | '+' | '~' | '.' | '(' | ')' | '\'' | '"' | '!' | '-' | ':' | '@'
        )
}

/// Slug transform with its options and table resolved up front.
#[derive(Debug, Clone)]
pub struct Slugifier {
    lower: bool,
    strict: bool,
    trim: bool,
    replacement: String,
    remove: Regex,
    table: CharTable,
}

impl Default for Slugifier {
    fn default() -> Self {
        Self::from_parts(&SlugConfig::default(), DEFAULT_REMOVE_RE.clone())
    }
}

impl Slugifier {
    /// Resolve a slug configuration. Fails only on an invalid `remove` regex.
    pub fn new(config: &SlugConfig) -> Result<Self, regex::Error> {
        let remove = match &config.remove {
            Some(pattern) => Regex::new(pattern)?,
            None => DEFAULT_REMOVE_RE.clone(),
        };
        Ok(Self::from_parts(config, remove))
    }

    fn from_parts(config: &SlugConfig, remove: Regex) -> Self {
        Self {
            lower: config.lower,
            strict: config.strict,
            trim: config.trim,
            replacement: config.replacement.clone(),
            remove,
            table: build_table(config),
        }
    }

    /// Slugify a raw value.
    pub fn slugify(&self, text: &str) -> String {
        let mut slug = String::with_capacity(text.len());
        let mut buf = [0u8; 4];

        for c in text.chars() {
            let mapped: &str = match self.table.get(&c) {
                Some(s) => s,
                None if c.is_ascii() => c.encode_utf8(&mut buf),
                None => deunicode_char(c).unwrap_or(""),
            };
            // The replacement itself becomes a separator
            let mapped = if mapped == self.replacement { " " } else { mapped };
            slug.extend(mapped.chars().filter(|&ch| is_allowed(ch)));
        }

        let mut slug = self.remove.replace_all(&slug, "").into_owned();
        if self.strict {
            slug.retain(|c| c.is_ascii_alphanumeric() || c.is_whitespace());
        }

        let trimmed = if self.trim { slug.trim() } else { slug.as_str() };
        let joined = WHITESPACE_RE.replace_all(trimmed, NoExpand(&self.replacement));

        if self.lower {
            joined.to_lowercase()
        } else {
            joined.into_owned()
        }
    }
}

/// Slugify with default options (lower-case, `-` separator).
pub fn slugify(text: &str) -> String {
    Slugifier::default().slugify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugifier(config: SlugConfig) -> Slugifier {
        Slugifier::new(&config).unwrap()
    }

    #[test]
    fn test_default_lowercases_and_joins() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Hello   World  "), "hello-world");
    }

    #[test]
    fn test_default_removes_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("What's new? (2024)"), "whats-new-2024");
        assert_eq!(slugify("a.b:c@d"), "abcd");
    }

    #[test]
    fn test_symbols_are_spelled_out() {
        assert_eq!(slugify("Tom & Jerry"), "tom-and-jerry");
        assert_eq!(slugify("100%"), "100percent");
    }

    #[test]
    fn test_transliterates_unicode() {
        assert_eq!(slugify("Café déjà vu"), "cafe-deja-vu");
    }

    #[test]
    fn test_replacement_char_becomes_separator() {
        assert_eq!(slugify("foo-bar baz"), "foo-bar-baz");
        assert_eq!(slugify("foo - bar"), "foo-bar");

        let s = slugifier(SlugConfig {
            replacement: "_".into(),
            ..SlugConfig::default()
        });
        assert_eq!(s.slugify("Hello World"), "hello_world");
        assert_eq!(s.slugify("snake_case title"), "snake_case_title");
    }

    #[test]
    fn test_preserve_case() {
        let s = slugifier(SlugConfig {
            lower: false,
            ..SlugConfig::default()
        });
        assert_eq!(s.slugify("Hello World"), "Hello-World");
    }

    #[test]
    fn test_strict_mode() {
        let s = slugifier(SlugConfig {
            strict: true,
            ..SlugConfig::default()
        });
        assert_eq!(s.slugify("foo_bar baz"), "foobar-baz");
    }

    #[test]
    fn test_locale_table() {
        let s = slugifier(SlugConfig {
            locale: Some("de".into()),
            ..SlugConfig::default()
        });
        assert_eq!(s.slugify("Straße über Ärger"), "strasse-ueber-aerger");

        // Without the locale, deunicode drops the umlaut
        assert_eq!(slugify("über"), "uber");
    }

    #[test]
    fn test_extend_table_is_per_instance() {
        let mut config = SlugConfig::default();
        config.extend.insert("#".into(), "sharp".into());
        let extended = slugifier(config);
        assert_eq!(extended.slugify("C# tips"), "csharp-tips");

        // A fresh slugifier is unaffected
        assert_eq!(slugify("C# tips"), "c-tips");
    }

    #[test]
    fn test_locale_wins_over_extend() {
        let mut config = SlugConfig {
            locale: Some("de".into()),
            ..SlugConfig::default()
        };
        config.extend.insert("ü".into(), "u".into());
        assert_eq!(slugifier(config).slugify("über"), "ueber");
    }

    #[test]
    fn test_custom_remove_pattern() {
        let s = slugifier(SlugConfig {
            remove: Some("[0-9]".into()),
            ..SlugConfig::default()
        });
        assert_eq!(s.slugify("Top 10 posts"), "top-posts");
    }

    #[test]
    fn test_invalid_remove_pattern() {
        let config = SlugConfig {
            remove: Some("[".into()),
            ..SlugConfig::default()
        };
        assert!(Slugifier::new(&config).is_err());
    }
}
