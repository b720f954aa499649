//! All error types for the genstrings crate.
//!
//! Every fallible operation (scanning, parsing, writing, configuration) returns
//! [`Error`]. Each variant names the offending path so the CLI can report it verbatim.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid UTF-8 in {} at line {line}, column {column}", path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("cannot decode {}: {message}", path.display())]
    Encoding { path: PathBuf, message: String },

    #[error("parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is out of date; run genstrings to update it", path.display())]
    OutOfDate { path: PathBuf },

    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Maps an I/O error raised while opening `path` for reading, keeping
    /// "not found" distinct from other read failures.
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound { path }
        } else {
            Error::Read { path, source }
        }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
