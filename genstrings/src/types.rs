//! Core types shared by the extractor, the reconciler and the `.strings` codec.

use std::{
    cmp::Ordering,
    collections::{HashMap, hash_map},
};

use serde::{Deserialize, Serialize};

/// One localized string: the lookup key, its translation and a translator comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct StringEntry {
    /// Literal taken from source; the lookup identifier across all locales.
    pub key: String,
    /// Translated text, stored in its escaped `.strings` form.
    pub value: String,
    /// Translator comment, without the `/*` `*/` markers. May be empty.
    #[serde(default)]
    pub comment: String,
}

impl StringEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, comment: impl Into<String>) -> Self {
        StringEntry {
            key: key.into(),
            value: value.into(),
            comment: comment.into(),
        }
    }

    /// An entry for a key that has no translation yet: the key doubles as
    /// its own placeholder value and the comment is empty.
    pub fn untranslated(key: impl Into<String>) -> Self {
        let key = key.into();
        StringEntry {
            value: key.clone(),
            key,
            comment: String::new(),
        }
    }
}

/// Orders keys case-insensitively, falling back to the exact key so that
/// keys differing only in case still sort deterministically.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// All string entries for one locale, keyed by [`StringEntry::key`].
///
/// Storage order is irrelevant; use [`Catalog::sorted_entries`] for output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: HashMap<String, StringEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Inserts `entry`, returning the entry previously stored under its key.
    pub fn insert(&mut self, entry: StringEntry) -> Option<StringEntry> {
        self.entries.insert(entry.key.clone(), entry)
    }

    pub fn remove(&mut self, key: &str) -> Option<StringEntry> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, String, StringEntry> {
        self.entries.keys()
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, StringEntry> {
        self.entries.values()
    }

    /// Entries ordered by [`compare_keys`], the order they are written in.
    pub fn sorted_entries(&self) -> Vec<&StringEntry> {
        let mut entries: Vec<&StringEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| compare_keys(&a.key, &b.key));
        entries
    }

    /// Keys in output order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        self.sorted_entries()
            .into_iter()
            .map(|entry| entry.key.as_str())
            .collect()
    }
}

impl FromIterator<StringEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = StringEntry>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}

impl Extend<StringEntry> for Catalog {
    fn extend<I: IntoIterator<Item = StringEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl IntoIterator for Catalog {
    type Item = StringEntry;
    type IntoIter = hash_map::IntoValues<String, StringEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StringEntry;
    type IntoIter = hash_map::Values<'a, String, StringEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
