//! Leading-comment metadata parsing.
//!
//! Asset files start with a block of comment lines. Lines inside that block
//! that mention the metadata namespace (`dataset.` by default) must have the
//! shape `dataset.key = value`; other comment lines (shebangs, prose) are
//! skipped. The block ends at the first non-blank line that is not a comment.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

static METADATA_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn metadata_line_regex() -> &'static Regex {
    METADATA_LINE_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$")
            .expect("valid regex literal")
    })
}

/// The leading comment block of a source file, split from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBlock<'a> {
    /// Non-empty comment lines with the prefix and leading whitespace removed
    pub lines: Vec<&'a str>,

    /// Byte offset where the body (first non-comment line) starts
    pub body_offset: usize,
}

/// Split `source` into its leading comment lines and the offset of the body.
///
/// Blank lines are skipped wherever they occur inside the leading block.
/// Comment lines with nothing after the prefix are skipped as well.
pub fn split_metadata_block<'a>(source: &'a str, prefix: &str) -> MetadataBlock<'a> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let line = raw.trim();
        if line.is_empty() {
            offset += raw.len();
            continue;
        }
        match line.strip_prefix(prefix) {
            Some(rest) => {
                let content = rest.trim_start();
                if !content.is_empty() {
                    lines.push(content);
                }
                offset += raw.len();
            }
            None => break,
        }
    }

    MetadataBlock {
        lines,
        body_offset: offset,
    }
}

/// Parsed metadata: every key with its values in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    /// All values declared for `key`, in declaration order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Iterate keys (sorted) with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether any key was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` was declared at least once.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The single, non-empty value of a required key.
    pub fn single(&self, key: &str, path: &Path) -> CoreResult<&str> {
        match self.optional_single(key, path)? {
            Some(value) => Ok(value),
            None => Err(CoreError::MissingMetadataKey {
                path: path.display().to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// The value of a key that may be absent but must not repeat or be empty.
    pub fn optional_single(&self, key: &str, path: &Path) -> CoreResult<Option<&str>> {
        let values = match self.entries.get(key) {
            Some(values) if !values.is_empty() => values,
            _ => return Ok(None),
        };
        if values.len() != 1 {
            return Err(CoreError::DuplicateMetadataKey {
                path: path.display().to_string(),
                key: key.to_string(),
            });
        }
        let value = values[0].as_str();
        if value.is_empty() {
            return Err(CoreError::EmptyMetadataValue {
                path: path.display().to_string(),
                key: key.to_string(),
            });
        }
        Ok(Some(value))
    }

    fn push(&mut self, key: &str, value: &str) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
}

/// Parse `namespace.key = value` lines into a [`Metadata`] map.
///
/// Lines that do not contain `namespace.` are ignored. A line that contains
/// it but does not match the pattern is an error naming `path`.
pub fn parse_metadata_lines(lines: &[&str], namespace: &str, path: &Path) -> CoreResult<Metadata> {
    let marker = format!("{}.", namespace);
    let re = metadata_line_regex();
    let mut metadata = Metadata::default();

    for line in lines {
        if !line.contains(&marker) {
            continue;
        }
        let caps = re
            .captures(line)
            .filter(|caps| &caps[1] == namespace)
            .ok_or_else(|| CoreError::InvalidMetadataLine {
                path: path.display().to_string(),
                line: line.to_string(),
            })?;
        metadata.push(&caps[2], caps[3].trim());
    }

    Ok(metadata)
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
