//! Run configuration.
//!
//! Every path and name the reconciler touches comes from [`Config`]; nothing is
//! read from globals. The defaults reproduce the layout of the iOS project the
//! tool was written for, so running without a config file needs no setup:
//!
//! ```toml
//! [source]
//! root = "ASAPP"
//! extensions = ["swift"]
//! marker_start = 'ASAPPLocalizedString("'
//! marker_end = '")'
//! exclude = []
//! respect_ignore_files = false
//!
//! [catalogs]
//! root = "Resources/Localizations"
//! file_name = "Localizable.strings"
//! master = "en.lproj"
//! secondary = ["es.lproj", "ko.lproj"]
//! new_strings_file = "New-{locale}.strings"
//! ```

use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, io::read_text};

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "genstrings.toml";

/// Placeholder replaced by the locale directory name in
/// [`CatalogConfig::new_strings_file`].
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub catalogs: CatalogConfig,
}

/// Where and how localization keys are found in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory tree to scan.
    pub root: PathBuf,
    /// File extensions to scan, without the leading dot.
    pub extensions: Vec<String>,
    /// Text opening a localization call, up to the first character of the key.
    pub marker_start: String,
    /// Text closing a localization call, right after the last character of the key.
    pub marker_end: String,
    /// Glob patterns, relative to `root`, of files and directories to skip.
    pub exclude: Vec<String>,
    /// Honour `.gitignore` and `.ignore` files while walking.
    pub respect_ignore_files: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            root: PathBuf::from("ASAPP"),
            extensions: vec!["swift".to_string()],
            marker_start: "ASAPPLocalizedString(\"".to_string(),
            marker_end: "\")".to_string(),
            exclude: Vec::new(),
            respect_ignore_files: false,
        }
    }
}

impl SourceConfig {
    /// Whether `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.') == ext)
            })
    }

    /// Compiles [`SourceConfig::exclude`] into one matcher.
    pub fn exclude_set(&self) -> Result<GlobSet, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(compile_glob(pattern)?);
        }
        builder
            .build()
            .map_err(|e| Error::config(format!("failed to build exclude set: {e}")))
    }
}

fn compile_glob(pattern: &str) -> Result<Glob, Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::config(format!("invalid exclude pattern '{pattern}': {e}")))
}

/// Layout of the locale directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory holding one subdirectory per locale.
    pub root: PathBuf,
    /// Catalog file name inside each locale directory.
    pub file_name: String,
    /// Locale directory treated as the source of truth.
    pub master: String,
    /// Locale directories that only receive new-strings files.
    pub secondary: Vec<String>,
    /// Name of the per-locale new-strings file, written under `root`.
    /// Must contain `{locale}`.
    pub new_strings_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            root: PathBuf::from("Resources/Localizations"),
            file_name: "Localizable.strings".to_string(),
            master: "en.lproj".to_string(),
            secondary: vec!["es.lproj".to_string(), "ko.lproj".to_string()],
            new_strings_file: format!("New-{LOCALE_PLACEHOLDER}.strings"),
        }
    }
}

impl CatalogConfig {
    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        self.root.join(locale).join(&self.file_name)
    }

    pub fn master_path(&self) -> PathBuf {
        self.catalog_path(&self.master)
    }

    pub fn new_strings_path(&self, locale: &str) -> PathBuf {
        self.root
            .join(self.new_strings_file.replace(LOCALE_PLACEHOLDER, locale))
    }
}

impl Config {
    /// Loads a TOML config file. Relative paths inside it are resolved
    /// against the directory containing the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = read_text(path)?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Loads `genstrings.toml` from `dir` if present, otherwise returns the
    /// defaults resolved against `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Config::load(candidate)
        } else {
            Ok(Config::default().relative_to(dir))
        }
    }

    /// Rebases the relative source and catalog roots onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.source.root.is_relative() {
            self.source.root = base.join(&self.source.root);
        }
        if self.catalogs.root.is_relative() {
            self.catalogs.root = base.join(&self.catalogs.root);
        }
        self
    }

    /// Checks everything that can be checked before touching the file system.
    pub fn validate(&self) -> Result<(), Error> {
        let source = &self.source;
        if source.marker_start.is_empty() || source.marker_end.is_empty() {
            return Err(Error::config("extraction markers must not be empty"));
        }
        if source
            .extensions
            .iter()
            .all(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(Error::config("no source file extensions configured"));
        }
        source.exclude_set()?;

        let catalogs = &self.catalogs;
        if catalogs.file_name.is_empty() {
            return Err(Error::config("catalog file name must not be empty"));
        }
        if !catalogs.new_strings_file.contains(LOCALE_PLACEHOLDER) {
            return Err(Error::config(format!(
                "new_strings_file '{}' must contain {LOCALE_PLACEHOLDER}",
                catalogs.new_strings_file
            )));
        }
        validate_locale(&catalogs.master)?;
        for (idx, locale) in catalogs.secondary.iter().enumerate() {
            validate_locale(locale)?;
            if *locale == catalogs.master {
                return Err(Error::config(format!(
                    "master locale '{locale}' is also listed as secondary"
                )));
            }
            if catalogs.secondary[..idx].contains(locale) {
                return Err(Error::config(format!(
                    "secondary locale '{locale}' is listed twice"
                )));
            }
        }
        Ok(())
    }
}

/// Parses a locale directory name such as `en.lproj` or `zh-Hans.lproj`
/// into its language identifier. Xcode's `Base` has none.
pub fn locale_identifier(locale: &str) -> Result<Option<LanguageIdentifier>, Error> {
    let name = locale.strip_suffix(".lproj").unwrap_or(locale);
    if name == "Base" {
        return Ok(None);
    }
    name.parse::<LanguageIdentifier>()
        .map(Some)
        .map_err(|e| Error::config(format!("invalid locale '{locale}': {e}")))
}

fn validate_locale(locale: &str) -> Result<(), Error> {
    if locale.is_empty() || locale.contains(['/', '\\']) {
        return Err(Error::config(format!(
            "invalid locale directory name '{locale}'"
        )));
    }
    locale_identifier(locale).map(|_| ())
}
