//! Extraction of localization keys from source files.
//!
//! Each line is searched for a start marker and the first end marker after it;
//! the text in between is the key. Keys split across lines are not seen.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use ignore::WalkBuilder;
use tracing::{debug, info};

use crate::{
    config::SourceConfig,
    error::Error,
    formats::escape_value,
    io::read_text,
    types::{Catalog, StringEntry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the start marker from `pos`.
    Scanning,
    /// Start marker found; the key begins at `key_start`.
    InMarker { key_start: usize },
}

/// Iterator over the marker-delimited literals of a single line.
///
/// ```
/// use genstrings::extract::MarkerScanner;
///
/// let line = r#"label.text = L("Hello") + L("World")"#;
/// let keys: Vec<_> = MarkerScanner::new(line, "L(\"", "\")").collect();
/// assert_eq!(keys, vec!["Hello", "World"]);
/// ```
#[derive(Debug, Clone)]
pub struct MarkerScanner<'a> {
    line: &'a str,
    start: &'a str,
    end: &'a str,
    pos: usize,
    state: ScanState,
}

impl<'a> MarkerScanner<'a> {
    pub fn new(line: &'a str, start: &'a str, end: &'a str) -> Self {
        MarkerScanner {
            line,
            start,
            end,
            pos: 0,
            state: ScanState::Scanning,
        }
    }
}

impl<'a> Iterator for MarkerScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.start.is_empty() || self.end.is_empty() {
            return None;
        }
        loop {
            match self.state {
                ScanState::Scanning => {
                    let found = self.line[self.pos..].find(self.start)?;
                    self.state = ScanState::InMarker {
                        key_start: self.pos + found + self.start.len(),
                    };
                }
                ScanState::InMarker { key_start } => {
                    self.state = ScanState::Scanning;
                    let Some(len) = self.line[key_start..].find(self.end) else {
                        // An unclosed marker ends the line.
                        self.pos = self.line.len();
                        return None;
                    };
                    self.pos = key_start + len + self.end.len();
                    return Some(&self.line[key_start..key_start + len]);
                }
            }
        }
    }
}

/// Result of scanning a source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// One untranslated entry per distinct key.
    pub strings: Catalog,
    /// Files whose extension matched and were scanned.
    pub files_scanned: usize,
    /// Marker occurrences found, duplicates included.
    pub occurrences: usize,
}

/// Collects localization keys from the files under [`SourceConfig::root`].
pub struct Extractor<'a> {
    config: &'a SourceConfig,
    exclude: GlobSet,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a SourceConfig) -> Result<Self, Error> {
        Ok(Extractor {
            config,
            exclude: config.exclude_set()?,
        })
    }

    /// Walks the source root in file-name order and scans every matching file.
    pub fn extract(&self) -> Result<Extraction, Error> {
        let root = &self.config.root;
        if !root.is_dir() {
            return Err(Error::FileNotFound { path: root.clone() });
        }

        let mut extraction = Extraction::default();
        for path in self.source_files()? {
            debug!("scanning {}", path.display());
            let text = read_text(&path)?;
            extraction.occurrences += self.scan_text(&text, &mut extraction.strings);
            extraction.files_scanned += 1;
        }

        info!(
            "extracted {} keys ({} occurrences) from {} files under {}",
            extraction.strings.len(),
            extraction.occurrences,
            extraction.files_scanned,
            root.display()
        );
        Ok(extraction)
    }

    /// Adds every key found in `text` to `strings`, returning the number of
    /// occurrences. Keys are stored in their escaped catalog form, so they
    /// compare equal to the keys read back from a written catalog. Keys
    /// already present are left as they are.
    pub fn scan_text(&self, text: &str, strings: &mut Catalog) -> usize {
        let mut occurrences = 0;
        for line in text.lines() {
            let scanner =
                MarkerScanner::new(line, &self.config.marker_start, &self.config.marker_end);
            for key in scanner {
                if key.is_empty() {
                    debug!("skipping empty localization key in {line:?}");
                    continue;
                }
                occurrences += 1;
                let key = escape_value(key);
                if !strings.contains_key(&key) {
                    strings.insert(StringEntry::untranslated(key));
                }
            }
        }
        occurrences
    }

    fn source_files(&self) -> Result<Vec<PathBuf>, Error> {
        let respect = self.config.respect_ignore_files;
        let root = self.config.root.clone();
        let exclude = self.exclude.clone();

        let walker = WalkBuilder::new(&self.config.root)
            .standard_filters(false)
            .hidden(false)
            .git_ignore(respect)
            .git_exclude(respect)
            .ignore(respect)
            .parents(respect)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |dent| !is_excluded(&exclude, &root, dent.path()))
            .build();

        let mut files = Vec::new();
        for dent in walker {
            let dent = dent?;
            if dent.file_type().is_some_and(|t| t.is_file())
                && self.config.matches_extension(dent.path())
            {
                files.push(dent.into_path());
            }
        }
        Ok(files)
    }
}

fn is_excluded(exclude: &GlobSet, root: &Path, path: &Path) -> bool {
    if exclude.is_empty() {
        return false;
    }
    path.strip_prefix(root)
        .is_ok_and(|relative| !relative.as_os_str().is_empty() && exclude.is_match(relative))
}
