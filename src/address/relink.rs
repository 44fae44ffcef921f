//! Rewrite references to carried files inside a relocated document.

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

use crate::page::Document;
use crate::{debug, log};

/// A carried file: `(new key, old relative key)`.
pub type Move = (String, String);

/// Replace every occurrence of an old relative key with its new key.
///
/// One left-to-right pass: inserted text is never rescanned, and where two
/// keys start at the same position the longest wins. Non-UTF-8 payloads are
/// left alone. Returns the number of replacements.
pub fn relink(doc: &mut Document, moves: &[Move]) -> usize {
    let lookup: FxHashMap<&str, &str> = moves
        .iter()
        .filter(|(_, old)| !old.is_empty())
        .map(|(new, old)| (old.as_str(), new.as_str()))
        .collect();
    if lookup.is_empty() {
        return 0;
    }

    let Some(text) = doc.text() else {
        debug!("relink"; "contents are not utf-8, skipping {} reference(s)", lookup.len());
        return 0;
    };

    let mut keys: Vec<&str> = lookup.keys().copied().collect();
    keys.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = keys
        .iter()
        .map(|key| regex::escape(key))
        .collect::<Vec<_>>()
        .join("|");

    let matcher = match Regex::new(&alternation) {
        Ok(re) => re,
        Err(err) => {
            log!("warning"; "cannot relink {} file(s): {}", keys.len(), err);
            return 0;
        }
    };

    let mut count = 0;
    let rewritten = matcher.replace_all(text, |caps: &Captures| {
        count += 1;
        lookup.get(&caps[0]).copied().unwrap_or_default().to_owned()
    });

    if count > 0 {
        doc.contents = rewritten.into_owned().into_bytes();
    }
    count
}
