//! Key-set reconciliation between catalogs.
//!
//! Differences are always computed first and applied to a copy afterwards, so
//! no catalog is mutated while it is being compared.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::Catalog;

/// Keys gained and lost between a source-of-truth catalog and a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyDiff {
    /// Keys in the source of truth that the candidate lacks.
    pub added: BTreeSet<String>,
    /// Keys in the candidate that the source of truth lacks.
    pub removed: BTreeSet<String>,
}

impl KeyDiff {
    pub fn between(source_of_truth: &Catalog, candidate: &Catalog) -> Self {
        KeyDiff {
            added: missing_keys(source_of_truth, candidate),
            removed: missing_keys(candidate, source_of_truth),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn missing_keys(from: &Catalog, other: &Catalog) -> BTreeSet<String> {
    from.keys()
        .filter(|key| !other.contains_key(key))
        .cloned()
        .collect()
}

/// Merges freshly extracted strings into the master catalog.
///
/// Keys no longer found in source are dropped and new keys are added with
/// their extracted (untranslated) entry. Keys present on both sides keep the
/// master's value and comment untouched.
pub fn merge_extracted(master: &Catalog, extracted: &Catalog) -> (Catalog, KeyDiff) {
    let diff = KeyDiff::between(extracted, master);

    let mut merged = master.clone();
    for key in &diff.removed {
        merged.remove(key);
    }
    for key in &diff.added {
        if let Some(entry) = extracted.get(key) {
            merged.insert(entry.clone());
        }
    }

    (merged, diff)
}

/// Entries of `master` whose keys `locale` does not have yet.
pub fn missing_in_locale(master: &Catalog, locale: &Catalog) -> Catalog {
    master
        .iter()
        .filter(|entry| !locale.contains_key(&entry.key))
        .cloned()
        .collect()
}
