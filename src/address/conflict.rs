//! Conflict reporting for silent collisions.
//!
//! With `unique = false` two documents may resolve to the same key; the
//! later one overwrites the earlier. Claims are collected during the pass
//! and every key claimed more than once is reported afterwards.

use rustc_hash::FxHashMap;

use crate::log;
use crate::utils::plural_s;

/// Target key -> source keys claiming it, in claim order.
pub type ClaimMap = FxHashMap<String, Vec<String>>;

/// Several sources resolved to the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlConflict {
    /// The contested key
    pub target: String,
    /// Every source that claimed it; the last one won
    pub sources: Vec<String>,
}

/// Record that `source` now occupies `target`.
pub fn claim(claims: &mut ClaimMap, target: &str, source: &str) {
    let sources = claims.entry(target.to_owned()).or_default();
    if !sources.iter().any(|s| s == source) {
        sources.push(source.to_owned());
    }
}

/// Keys claimed by more than one source, sorted by key.
pub fn detect_conflicts(claims: &ClaimMap) -> Vec<UrlConflict> {
    let mut conflicts: Vec<_> = claims
        .iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(target, sources)| UrlConflict {
            target: target.clone(),
            sources: sources.clone(),
        })
        .collect();
    conflicts.sort_by(|a, b| a.target.cmp(&b.target));
    conflicts
}

/// Print conflicts using the standard log format.
///
/// Output format:
/// ```text
/// [warning] permalink collisions (1 key, 2 sources)
/// [key] foo/index.html (2 sources)
///   - a.html
///   - b.html
/// ```
pub fn print_conflicts(conflicts: &[UrlConflict]) {
    if conflicts.is_empty() {
        return;
    }

    let total_sources: usize = conflicts.iter().map(|c| c.sources.len()).sum();
    log!("warning"; "permalink collisions ({} key{}, {} source{})",
        conflicts.len(), plural_s(conflicts.len()),
        total_sources, plural_s(total_sources));

    for conflict in conflicts {
        log!("key"; "{} ({} source{})", conflict.target, conflict.sources.len(), plural_s(conflict.sources.len()));
        for source in &conflict.sources {
            println!("  - {source}");
        }
    }
}

/// Format conflicts as a string (for error messages).
pub fn format_conflicts(conflicts: &[UrlConflict]) -> String {
    conflicts
        .iter()
        .map(format_single_conflict)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_single_conflict(conflict: &UrlConflict) -> String {
    let mut lines = vec![format!("{} ({})", conflict.target, conflict.sources.len())];
    for source in &conflict.sources {
        lines.push(format!("  - {source}"));
    }
    lines.join("\n")
}
