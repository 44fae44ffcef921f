//! Family location: the non-HTML files that travel with a document.

use std::collections::BTreeMap;

use crate::config::Relative;
use crate::page::{Document, FileSet};
use crate::utils::path;

/// Files found for one source document, keyed by path relative to `base`.
#[derive(Debug, Default)]
pub struct Family<'a> {
    /// Directory the members were found under (`""` for the root).
    pub base: String,
    pub members: BTreeMap<String, &'a Document>,
}

impl Family<'_> {
    /// Current key of the member at `relative`.
    pub fn source_key(&self, relative: &str) -> String {
        path::join(&self.base, relative)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl Relative {
    /// Directory searched for the family of `source`, if any.
    pub fn family_dir(&self, source: &str) -> Option<String> {
        let dir = path::dirname(source);
        match self {
            Self::Off => None,
            Self::Directory => Some(dir.to_owned()),
            Self::Folder => Some(path::join(dir, path::file_stem(source))),
        }
    }

    /// Collect the family of `source` from `files`.
    ///
    /// HTML files and the source itself are never members. Prefix matching
    /// is on segment boundaries and recursive.
    pub fn locate<'a>(&self, source: &str, files: &'a FileSet) -> Family<'a> {
        let Some(base) = self.family_dir(source) else {
            return Family::default();
        };

        let members = files
            .iter()
            .filter(|(key, _)| key.as_str() != source && !path::is_html(key))
            .filter_map(|(key, doc)| {
                path::strip_dir(key, &base).map(|relative| (relative.to_owned(), doc))
            })
            .collect();

        Family { base, members }
    }
}
