//! Collision handling when a candidate directory is already taken.
//!
//! The default strategy looks for a free `<candidate>/<index_file>` slot:
//!
//! ```text
//! foo/index.html      taken -> try next
//! foo-1/index.html    taken -> try next
//! foo-2/index.html    free  -> accept
//! ```
//!
//! With `unique = false` the first slot is accepted even when taken (the
//! collision is reported, the last writer wins). With `duplicates_fail`
//! a taken slot aborts the pass.

use std::fmt;

use crate::config::{PermalinkConfig, UniqueFn};
use crate::page::FileSet;
use crate::utils::path;

use super::PermalinkError;

/// Options handed to uniqueness resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueOptions {
    pub index_file: String,
    pub unique: bool,
    pub duplicates_fail: bool,
}

impl UniqueOptions {
    pub fn from_config(config: &PermalinkConfig) -> Self {
        Self {
            index_file: config.index_file.clone(),
            unique: config.unique,
            duplicates_fail: config.duplicates_fail,
        }
    }
}

/// Default resolver, also usable from custom ones.
///
/// A slot already holding `source` is accepted, so running the pass twice
/// leaves permalinked documents where they are.
pub fn make_unique(
    candidate: &str,
    files: &FileSet,
    source: &str,
    options: &UniqueOptions,
) -> Result<String, PermalinkError> {
    let mut counter = 0usize;
    loop {
        let dir = match counter {
            0 => candidate.to_owned(),
            n => format!("{candidate}-{n}"),
        };
        let target = path::join(&dir, &options.index_file);

        if target == source || !files.contains_key(&target) {
            return Ok(target);
        }
        if options.duplicates_fail {
            return Err(PermalinkError::Collision {
                target,
                file: source.to_owned(),
            });
        }
        if !options.unique {
            return Ok(target);
        }
        counter += 1;
    }
}

/// Uniqueness behavior, resolved once per configuration.
#[derive(Clone)]
pub enum UniquenessStrategy {
    Default(UniqueOptions),
    Custom { f: UniqueFn, options: UniqueOptions },
}

impl UniquenessStrategy {
    pub fn from_config(config: &PermalinkConfig) -> Self {
        let options = UniqueOptions::from_config(config);
        match &config.hooks.unique {
            Some(f) => Self::Custom {
                f: f.clone(),
                options,
            },
            None => Self::Default(options),
        }
    }

    #[inline]
    pub fn options(&self) -> &UniqueOptions {
        match self {
            Self::Default(options) | Self::Custom { options, .. } => options,
        }
    }

    /// Final key for `source` given its candidate directory.
    pub fn resolve(
        &self,
        candidate: &str,
        files: &FileSet,
        source: &str,
    ) -> Result<String, PermalinkError> {
        match self {
            Self::Default(options) => make_unique(candidate, files, source, options),
            Self::Custom { f, options } => f(candidate, files, source, options),
        }
    }
}

impl fmt::Debug for UniquenessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(options) => f.debug_tuple("Default").field(options).finish(),
            Self::Custom { options, .. } => f
                .debug_struct("Custom")
                .field("options", options)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Document;

    fn options(unique: bool, duplicates_fail: bool) -> UniqueOptions {
        UniqueOptions {
            index_file: "index.html".into(),
            unique,
            duplicates_fail,
        }
    }

    fn files(keys: &[&str]) -> FileSet {
        keys.iter()
            .map(|key| (key.to_string(), Document::default()))
            .collect()
    }

    #[test]
    fn test_free_slot() {
        let files = files(&["a.html"]);
        let target = make_unique("foo", &files, "a.html", &options(true, false)).unwrap();
        assert_eq!(target, "foo/index.html");
    }

    #[test]
    fn test_suffixes_until_free() {
        let files = files(&["foo/index.html", "foo-1/index.html", "b.html"]);
        let target = make_unique("foo", &files, "b.html", &options(true, false)).unwrap();
        assert_eq!(target, "foo-2/index.html");
    }

    #[test]
    fn test_own_slot_is_accepted() {
        let files = files(&["foo/index.html"]);
        let target =
            make_unique("foo", &files, "foo/index.html", &options(true, true)).unwrap();
        assert_eq!(target, "foo/index.html");
    }

    #[test]
    fn test_silent_collision() {
        let files = files(&["foo/index.html", "b.html"]);
        let target = make_unique("foo", &files, "b.html", &options(false, false)).unwrap();
        assert_eq!(target, "foo/index.html");
    }

    #[test]
    fn test_duplicates_fail() {
        let files = files(&["foo/index.html", "b.html"]);
        let err = make_unique("foo", &files, "b.html", &options(true, true)).unwrap_err();
        assert!(matches!(
            &err,
            PermalinkError::Collision { target, file } if target == "foo/index.html" && file == "b.html"
        ));
    }

    #[test]
    fn test_root_candidate() {
        let files = files(&["index.html", "home.html"]);
        let target = make_unique("", &files, "home.html", &options(true, false)).unwrap();
        assert_eq!(target, "-1/index.html");
        let target = make_unique("", &files, "index.html", &options(true, false)).unwrap();
        assert_eq!(target, "index.html");
    }

    #[test]
    fn test_custom_strategy() {
        let config = PermalinkConfig::default().with_unique_fn(|candidate, files, source, opts| {
            if files.contains_key(source) {
                Ok(format!("{candidate}.{}", opts.index_file))
            } else {
                Err(PermalinkError::custom(source, "unknown source"))
            }
        });
        let strategy = UniquenessStrategy::from_config(&config);
        let files = files(&["a.html"]);
        assert_eq!(
            strategy.resolve("foo", &files, "a.html").unwrap(),
            "foo.index.html"
        );
        assert!(strategy.resolve("foo", &files, "zzz.html").is_err());
        assert_eq!(strategy.options().index_file, "index.html");
    }

    #[test]
    fn test_default_strategy_from_config() {
        let config = PermalinkConfig {
            unique: true,
            ..PermalinkConfig::default()
        };
        let strategy = UniquenessStrategy::from_config(&config);
        assert!(matches!(strategy, UniquenessStrategy::Default(ref o) if o.unique));
    }
}
