//! One reconciliation run: extract, merge into the master catalog, and emit a
//! new-strings file for every secondary locale.
//!
//! All inputs are read and all outputs rendered before the first write, so a
//! bad locale catalog aborts the run with the master catalog untouched.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::Error,
    extract::Extractor,
    io::{read_text_and_bytes, write_atomic},
    reconcile::{KeyDiff, merge_extracted, missing_in_locale},
    traits::Parser,
    types::Catalog,
};

/// What a run is allowed to do with its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Write the master catalog and the new-strings files.
    #[default]
    Write,
    /// Compute and report only.
    DryRun,
    /// Like `DryRun`, but fail if the master catalog is out of date.
    Check,
}

/// Per-locale outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleReport {
    pub locale: String,
    pub catalog: PathBuf,
    pub output: PathBuf,
    /// Master keys the locale has no translation for, in output order.
    pub missing: Vec<String>,
}

/// Summary of a run, suitable for logs and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub mode: RunMode,
    pub files_scanned: usize,
    pub occurrences: usize,
    pub extracted: usize,
    pub master: PathBuf,
    pub master_entries: usize,
    pub master_changed: bool,
    pub diff: KeyDiff,
    pub locales: Vec<LocaleReport>,
    /// Files actually written, in write order.
    pub written: Vec<PathBuf>,
}

/// Runs the reconciler described by `config`.
pub fn run(config: &Config, mode: RunMode) -> Result<SyncReport, Error> {
    config.validate()?;

    let extraction = Extractor::new(&config.source)?.extract()?;

    let master_path = config.catalogs.master_path();
    let (master_text, master_on_disk) = read_text_and_bytes(&master_path)?;
    let master = Catalog::from_text(&master_path, &master_text)?;
    debug!(
        "read {} entries from {}",
        master.len(),
        master_path.display()
    );

    let (updated, diff) = merge_extracted(&master, &extraction.strings);
    let master_bytes = updated.to_bytes();
    // Compared against the stored bytes so a BOM or UTF-16 counts as a change.
    let master_changed = master_bytes != master_on_disk;
    info!(
        "{}: {} added, {} removed, {} entries",
        master_path.display(),
        diff.added.len(),
        diff.removed.len(),
        updated.len()
    );

    let mut staged = vec![(master_path.clone(), master_bytes)];
    let mut locales = Vec::with_capacity(config.catalogs.secondary.len());
    for locale in &config.catalogs.secondary {
        let catalog_path = config.catalogs.catalog_path(locale);
        let existing = Catalog::read_from(&catalog_path)?;
        let missing = missing_in_locale(&updated, &existing);
        info!("{locale}: {} strings need translation", missing.len());

        let output = config.catalogs.new_strings_path(locale);
        locales.push(LocaleReport {
            locale: locale.clone(),
            catalog: catalog_path,
            output: output.clone(),
            missing: missing.sorted_keys().into_iter().map(String::from).collect(),
        });
        staged.push((output, missing.to_bytes()));
    }

    let mut written = Vec::new();
    match mode {
        RunMode::Write => {
            for (path, bytes) in staged {
                write_atomic(&path, &bytes)?;
                info!("wrote {}", path.display());
                written.push(path);
            }
        }
        RunMode::DryRun => info!("dry run: nothing written"),
        RunMode::Check => {
            if master_changed {
                return Err(Error::OutOfDate { path: master_path });
            }
        }
    }

    Ok(SyncReport {
        mode,
        files_scanned: extraction.files_scanned,
        occurrences: extraction.occurrences,
        extracted: extraction.strings.len(),
        master: master_path,
        master_entries: updated.len(),
        master_changed,
        diff,
        locales,
        written,
    })
}
