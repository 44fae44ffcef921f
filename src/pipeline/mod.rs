//! Permalink pass over a file set.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Phase 1 (per HTML document, in key order)               │
//! │  guard -> linkset -> candidate -> unique -> family      │
//! │        -> relink -> commit (rename in place)            │
//! └─────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────┐
//! │ Phase 2                                                 │
//! │  merge staged family copies into the file set           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A failure in phase 1 aborts the pass: documents committed so far keep
//! their new keys and nothing staged is merged.


use rustc_hash::FxHashSet;

use crate::address::conflict::{ClaimMap, claim, detect_conflicts};
use crate::address::relink::Move;
use crate::address::{
    Linkset, Linksets, PermalinkError, UniquenessStrategy, UrlConflict, print_conflicts, relink,
    resolve,
};
use crate::config::{ConfigError, PermalinkConfig};
use crate::page::{Document, FileSet};
use crate::utils::{path, plural_count, plural_s};
use crate::{debug, debug_do};

/// One document handled by the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Key before the pass
    pub source: String,
    /// Key after the pass
    pub target: String,
    /// New keys of the family files copied alongside
    pub carried: Vec<String>,
}

impl Relocation {
    /// Whether the document changed key.
    #[inline]
    pub fn is_move(&self) -> bool {
        self.source != self.target
    }
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub relocations: Vec<Relocation>,
    /// Silent collisions (`unique = false`), sorted by target
    pub conflicts: Vec<UrlConflict>,
}

impl Report {
    /// Final key of the document that started at `source`.
    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.relocations
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.target.as_str())
    }

    pub fn moved(&self) -> impl Iterator<Item = &Relocation> {
        self.relocations.iter().filter(|r| r.is_move())
    }

    pub fn carried_count(&self) -> usize {
        self.relocations.iter().map(|r| r.carried.len()).sum()
    }

    /// One-line summary for verbose output.
    pub fn summary(&self) -> String {
        format!(
            "{} moved, {} carried, {} collision{}",
            plural_count(self.moved().count(), "document"),
            plural_count(self.carried_count(), "file"),
            self.conflicts.len(),
            plural_s(self.conflicts.len())
        )
    }
}

/// The permalink engine, resolved from a [`PermalinkConfig`].
///
/// Resolution (linkset overlay, slug tables, date formats, uniqueness
/// strategy) happens once here; [`run`](Self::run) can then be called on any
/// number of file sets.
#[derive(Debug, Clone)]
pub struct Permalinks {
    linksets: Linksets,
    uniqueness: UniquenessStrategy,
}

impl Permalinks {
    pub fn new(config: &PermalinkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            linksets: Linksets::resolve(config)?,
            uniqueness: UniquenessStrategy::from_config(config),
        })
    }

    #[inline]
    pub fn linksets(&self) -> &Linksets {
        &self.linksets
    }

    /// Relocate every HTML document in `files`.
    pub fn run(&self, files: &mut FileSet) -> Result<Report, PermalinkError> {
        let sources: Vec<String> = files.keys().filter(|k| path::is_html(k)).cloned().collect();

        let mut committed: FxHashSet<String> = FxHashSet::default();
        let mut claims = ClaimMap::default();
        let mut staged: Vec<(String, Document)> = Vec::new();
        let mut report = Report::default();

        for source in sources {
            if committed.contains(&source) {
                debug!("permalinks"; "skip {}: already relocated here", source);
                continue;
            }
            let Some(doc) = files.get(&source) else {
                continue;
            };
            if doc.permalink.is_disabled() {
                debug!("permalinks"; "skip {}: permalink disabled", source);
                continue;
            }

            let linkset = self.linksets.select(doc);
            let candidate = candidate(&source, doc, linkset);
            let target = self.uniqueness.resolve(&candidate, files, &source)?;
            debug!("permalinks"; "{} -> {}", source, target);

            if target != source && files.contains_key(&target) {
                if !claims.contains_key(&target) {
                    claim(&mut claims, &target, &target);
                }
                debug!("permalinks"; "{} overwrites {}", source, target);
            }

            // Family: copy members to the target directory
            let target_dir = path::dirname(&target).to_owned();
            let family = linkset.relative.locate(&source, files);
            let mut moves: Vec<Move> = Vec::new();
            for (relative, member) in &family.members {
                let new_key = path::join(&target_dir, relative);
                if new_key == family.source_key(relative) {
                    continue;
                }
                debug!("permalinks"; "carry {} -> {}", family.source_key(relative), new_key);
                staged.push((new_key.clone(), (*member).clone()));
                moves.push((new_key, relative.clone()));
            }
            drop(family);

            // Commit
            let Some(mut doc) = files.remove(&source) else {
                continue;
            };
            relink(&mut doc, &moves);
            doc.path = Some(target_dir);
            files.insert(target.clone(), doc);

            claim(&mut claims, &target, &source);
            committed.insert(target.clone());
            report.relocations.push(Relocation {
                source,
                target,
                carried: moves.into_iter().map(|(new_key, _)| new_key).collect(),
            });
        }

        // Phase 2
        for (key, doc) in staged {
            if committed.contains(&key) {
                debug!("permalinks"; "drop carried {}: key holds a document", key);
                continue;
            }
            files.insert(key, doc);
        }

        report.conflicts = detect_conflicts(&claims);
        debug_do! {
            print_conflicts(&report.conflicts);
        }

        debug!("permalinks"; "{}", report.summary());

        Ok(report)
    }

    /// Run the pass and hand the result to `done`, called exactly once.
    pub fn run_with<F>(&self, files: &mut FileSet, done: F)
    where
        F: FnOnce(Result<Report, PermalinkError>),
    {
        done(self.run(files));
    }
}

/// Candidate directory: explicit override, else pattern, else source path.
fn candidate(source: &str, doc: &Document, linkset: &Linkset) -> String {
    if let Some(permalink) = doc.permalink.custom() {
        return resolve::explicit(permalink);
    }
    linkset
        .pattern
        .as_ref()
        .and_then(|pattern| pattern.resolve(doc, linkset))
        .unwrap_or_else(|| resolve::fallback(source))
}
