//! File helpers: strict text decoding and atomic writes.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use tempfile::NamedTempFile;

use crate::error::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads `path` and decodes it as text.
///
/// UTF-8 is the default; a UTF-8 BOM is dropped. A UTF-16 BOM switches to
/// UTF-16 decoding, as Xcode still emits some `.strings` files that way.
/// Malformed input is an error, never replaced.
pub fn read_text(path: &Path) -> Result<String, Error> {
    read_text_and_bytes(path).map(|(text, _)| text)
}

/// Like [`read_text`], also returning the bytes as stored on disk.
pub fn read_text_and_bytes(path: &Path) -> Result<(String, Vec<u8>), Error> {
    let bytes = fs::read(path).map_err(|e| Error::from_read(path, e))?;
    let text = decode_text(path, &bytes)?;
    Ok((text, bytes))
}

/// Decodes `bytes` read from `path`. See [`read_text`].
pub fn decode_text(path: &Path, bytes: &[u8]) -> Result<String, Error> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes)
        && (encoding == UTF_16LE || encoding == UTF_16BE)
    {
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(|text| text.into_owned())
            .ok_or_else(|| Error::Encoding {
                path: path.to_path_buf(),
                message: format!("malformed {} data", encoding.name()),
            });
    }

    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => {
            let (line, column) = text_position(&bytes[..e.valid_up_to()]);
            Err(Error::Decode {
                path: path.to_path_buf(),
                line,
                column,
            })
        }
    }
}

// 1-based line and column of the character following `valid_prefix`.
fn text_position(valid_prefix: &[u8]) -> (usize, usize) {
    // The prefix was validated by `from_utf8`, so this never loses data.
    let prefix = String::from_utf8_lossy(valid_prefix);
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(idx) => prefix[idx + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, column)
}

/// Replaces `path` with `contents` through a temporary file in the same
/// directory and a rename, so readers never observe a truncated file.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(write_error)?;

    let mut temp = NamedTempFile::new_in(&parent).map_err(write_error)?;
    temp.write_all(contents).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
