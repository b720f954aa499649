#![forbid(unsafe_code)]
//! Localized string extraction and catalog reconciliation for Apple projects.
//!
//! Scans source files for localization calls, merges the keys it finds into the
//! master locale's `.strings` catalog, and writes a "new strings" catalog for
//! every other locale listing what still needs translating.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use genstrings::{Config, RunMode, run};
//!
//! let config = Config::discover(".")?;
//! let report = run(&config, RunMode::Write)?;
//! println!("{} keys added", report.diff.added.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Guarantees
//!
//! - Translations and comments of keys still in use are never overwritten.
//! - Keys no longer found in source are removed from the master catalog.
//! - Catalogs are written sorted case-insensitively, so rerunning without
//!   source changes leaves them byte-identical.
//! - Secondary locale catalogs are only ever read.

pub mod config;
pub mod error;
pub mod extract;
pub mod formats;
pub mod io;
pub mod reconcile;
pub mod sync;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    error::Error,
    extract::{Extraction, Extractor},
    reconcile::{KeyDiff, merge_extracted, missing_in_locale},
    sync::{LocaleReport, RunMode, SyncReport, run},
    types::{Catalog, StringEntry},
};
