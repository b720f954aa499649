//! Traits for reading and writing catalog files.

use std::{io::Write, path::Path};

use crate::{
    error::Error,
    io::{read_text, write_atomic},
};

/// A file format that can be parsed from text and serialized back.
///
/// # Example
///
/// ```rust,no_run
/// use genstrings::{Catalog, traits::Parser};
/// let catalog = Catalog::read_from("en.lproj/Localizable.strings")?;
/// catalog.write_to("New-en.lproj.strings")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse decoded text. `origin` only labels errors.
    fn from_text(origin: &Path, text: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Serialize to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> std::io::Result<()>;

    /// Parse from file path, decoding strictly.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let text = read_text(path)?;
        Self::from_text(path, &text)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_text(Path::new("<string>"), s)
    }

    /// Serialized form as bytes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.to_writer(&mut buf);
        buf
    }

    /// Replace the file at `path` atomically.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_atomic(path.as_ref(), &self.to_bytes())
    }
}

