//! Permalink configuration, usually loaded from `permalinks.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Option groups
//! │   ├── hooks      # Caller-supplied closures
//! │   ├── linkset    # [[linksets]]
//! │   ├── relative   # relative = true | false | "folder"
//! │   └── slug       # [slug]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PermalinkConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! pattern = ":date/:title"    # Default pattern (unset = derive from source path)
//! date = "YYYY/MM/DD"         # Format for date fields
//! index_file = "index.html"   # File name inside each permalink directory
//! unique = true               # Suffix -1, -2, ... on collisions
//! duplicates_fail = false     # Abort on the first collision instead
//! relative = "folder"         # Carry files from `<dir>/<stem>/`
//!
//! [slug]
//! locale = "de"
//!
//! [[linksets]]
//! match = { collection = "blog" }
//! pattern = "blog/:title"
//! ```

pub mod section;
pub mod types;

pub use section::{
    DateFn, Hooks, LinksetConfig, LinksetFields, Relative, SlugConfig, SlugFn, UniqueFn,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use std::{fs, path::Path, sync::Arc};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::address::{PermalinkError, UniqueOptions};
use crate::log;
use crate::page::FileSet;
use crate::utils::date::{DEFAULT_DATE_FORMAT, DateTimeUtc};

/// Default file name written inside each permalink directory.
pub const DEFAULT_INDEX_FILE: &str = "index.html";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `permalinks.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermalinkConfig {
    /// Default pattern. `None` derives permalinks from source paths.
    pub pattern: Option<String>,

    /// Format for date fields (see `utils::date`).
    pub date: String,

    /// File name inside each permalink directory.
    pub index_file: String,

    /// Slug options for non-date fields.
    pub slug: SlugConfig,

    /// Resolve collisions by suffixing `-1`, `-2`, ...
    pub unique: bool,

    /// Abort on the first collision.
    pub duplicates_fail: bool,

    /// Family policy.
    pub relative: Relative,

    /// Metadata-selected option bundles, first match wins.
    pub linksets: Vec<LinksetConfig>,

    /// Closures set through the builder methods.
    #[serde(skip)]
    pub hooks: Hooks,
}

impl Default for PermalinkConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            date: DEFAULT_DATE_FORMAT.into(),
            index_file: DEFAULT_INDEX_FILE.into(),
            slug: SlugConfig::default(),
            unique: false,
            duplicates_fail: false,
            relative: Relative::Off,
            linksets: Vec::new(),
            hooks: Hooks::default(),
        }
    }
}

impl PermalinkConfig {
    const INDEX_FILE: FieldPath = FieldPath::new("index_file");
    const DATE: FieldPath = FieldPath::new("date");

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML and collect the paths of fields that were not recognized.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ------------------------------------------------------------------------
    // builders
    // ------------------------------------------------------------------------

    /// Builder: set the default pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Builder: append a linkset.
    pub fn with_linkset(mut self, linkset: LinksetConfig) -> Self {
        self.linksets.push(linkset);
        self
    }

    /// Builder: replace the slugifier.
    pub fn with_slug_fn(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.hooks.slug = Some(Arc::new(f));
        self
    }

    /// Builder: replace the date format.
    pub fn with_date_fn(
        mut self,
        f: impl Fn(&DateTimeUtc) -> String + Send + Sync + 'static,
    ) -> Self {
        self.hooks.date = Some(Arc::new(f));
        self
    }

    /// Builder: replace the uniqueness resolver.
    pub fn with_unique_fn(
        mut self,
        f: impl Fn(&str, &FileSet, &str, &UniqueOptions) -> Result<String, PermalinkError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.hooks.unique = Some(Arc::new(f));
        self
    }

    // ------------------------------------------------------------------------
    // validation
    // ------------------------------------------------------------------------

    /// Validate every option, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.index_file.trim().is_empty() {
            diag.error(Self::INDEX_FILE, "must not be empty");
        } else if self.index_file.contains('/') {
            diag.error_with_hint(
                Self::INDEX_FILE,
                format!("`{}` must be a file name, not a path", self.index_file),
                "use the pattern to add directories",
            );
        }

        if self.date.trim().is_empty() {
            diag.error(Self::DATE, "date format must not be empty");
        }

        self.slug.validate(&SlugConfig::FIELDS, &mut diag);

        let defaults = self.linksets.iter().filter(|l| l.is_default).count();
        if defaults > 1 {
            diag.error(
                LinksetConfig::FIELDS.is_default,
                format!("{defaults} linksets are marked as default, expected at most one"),
            );
        }

        for (index, linkset) in self.linksets.iter().enumerate() {
            linkset.validate(index, &mut diag);
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Parse a test config, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PermalinkConfig {
    let (parsed, ignored) = PermalinkConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
