//! Support for the Apple `.strings` catalog format.
//!
//! A catalog is a sequence of records:
//!
//! ```text
//! /*Greeting shown on launch*/
//! "Hello" = "Hola";
//! ```
//!
//! Reading tolerates blank lines, `//` comments and block comments spanning
//! several lines; the comment closest to an entry is attached to it. Keys are
//! kept verbatim so they compare equal to the literals found in source, and
//! values are kept in their escaped form so a read/write cycle is lossless.

use std::{io::Write, path::Path};

use tracing::warn;

use crate::{
    error::Error,
    traits::Parser,
    types::{Catalog, StringEntry},
};

impl Parser for Catalog {
    fn from_text(origin: &Path, text: &str) -> Result<Self, Error> {
        let mut catalog = Catalog::new();
        let mut pending_comment: Option<String> = None;
        let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

        while let Some((line_no, raw)) = lines.next() {
            let line = raw.trim();

            if line.is_empty() {
                // A blank line detaches a preceding comment (file headers).
                pending_comment = None;
                continue;
            }

            if let Some(comment) = line.strip_prefix("//") {
                pending_comment = Some(comment.to_string());
                continue;
            }

            let mut record = line;
            if let Some(rest) = raw.trim_start().strip_prefix("/*") {
                match rest.find("*/") {
                    Some(end) => {
                        pending_comment = Some(rest[..end].to_string());
                        record = rest[end + 2..].trim();
                        if record.is_empty() {
                            continue;
                        }
                    }
                    None => {
                        let mut comment = rest.to_string();
                        loop {
                            let Some((next_no, next)) = lines.next() else {
                                return Err(Error::parse(
                                    origin,
                                    line_no,
                                    "unterminated `/*` comment",
                                ));
                            };
                            comment.push('\n');
                            if let Some(end) = next.find("*/") {
                                comment.push_str(&next[..end]);
                                if !next[end + 2..].trim().is_empty() {
                                    return Err(Error::parse(
                                        origin,
                                        next_no,
                                        "unexpected text after `*/`",
                                    ));
                                }
                                break;
                            }
                            comment.push_str(next);
                        }
                        pending_comment = Some(comment);
                        continue;
                    }
                }
            }

            let (key, value) =
                parse_record(record).map_err(|message| Error::parse(origin, line_no, message))?;
            let entry = StringEntry::new(key, value, pending_comment.take().unwrap_or_default());
            if let Some(previous) = catalog.insert(entry) {
                warn!(
                    "duplicate key {:?} in {} at line {}, keeping the last one",
                    previous.key,
                    origin.display(),
                    line_no
                );
            }
        }

        Ok(catalog)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let mut content = String::new();
        for entry in self.sorted_entries() {
            content.push_str(&render_entry(entry));
        }
        writer.write_all(content.as_bytes())?;
        writer.flush()
    }
}

// Parses `"key" = "value";` (optionally followed by a comment) into the
// verbatim key and value text.
fn parse_record(record: &str) -> Result<(&str, &str), &'static str> {
    let rest = record
        .strip_prefix('"')
        .ok_or("expected a quoted key")?;
    let (key, rest) = split_quoted(rest).ok_or("unbalanced quotes in key")?;
    if key.is_empty() {
        return Err("empty key");
    }

    let rest = rest
        .trim_start()
        .strip_prefix('=')
        .ok_or("expected `=` after key")?;
    let rest = rest
        .trim_start()
        .strip_prefix('"')
        .ok_or("expected a quoted value")?;
    let (value, rest) = split_quoted(rest).ok_or("unbalanced quotes in value")?;

    let rest = rest
        .trim_start()
        .strip_prefix(';')
        .ok_or("missing `;` terminator")?;
    let trailing = rest.trim();
    if trailing.is_empty()
        || trailing.starts_with("//")
        || (trailing.starts_with("/*") && trailing.ends_with("*/"))
    {
        Ok((key, value))
    } else {
        Err("unexpected text after `;`")
    }
}

// Splits `s` at its first quote not escaped by a backslash, returning the
// text before it and the text after it.
fn split_quoted(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'"' => return Some((&s[..idx], &s[idx + 1..])),
            _ => idx += 1,
        }
    }
    None
}

/// Escapes text for use between the quotes of a record.
///
/// Raw quotes become `\"`, newlines `\n` and carriage returns `\r`. Escape
/// sequences already present are left alone, so escaping is idempotent and
/// literals copied from Swift source are not escaped twice. A lone backslash
/// before a raw line break or at the end is doubled so it stays a literal
/// backslash and cannot swallow the closing quote.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut escaped = false;
    for c in value.chars() {
        match c {
            '"' if !escaped => out.push_str("\\\""),
            '\n' | '\r' => {
                if escaped {
                    out.push('\\');
                }
                out.push_str(if c == '\n' { "\\n" } else { "\\r" });
            }
            _ => out.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    if escaped {
        out.push('\\');
    }
    out
}

/// One catalog record: the comment line followed by the key/value line.
pub fn render_entry(entry: &StringEntry) -> String {
    format!(
        "/*{}*/\n\"{}\" = \"{}\";\n",
        entry.comment.replace("*/", "* /"),
        escape_value(&entry.key),
        escape_value(&entry.value)
    )
}
