//! Strongly-typed qualified asset name (`schema.table`).

use crate::identifier::is_valid_identifier;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;

/// Qualified name of an asset and of the table it materializes into.
///
/// Always exactly two valid identifiers joined by a single dot, so the
/// schema and table halves can be interpolated into SQL.
#[derive(Debug, Clone)]
pub struct AssetName {
    name: String,
    dot: usize,
}

impl AssetName {
    /// Build a name from its two halves, returning `None` if either is not
    /// a valid identifier.
    pub fn new(schema: &str, table: &str) -> Option<Self> {
        if !is_valid_identifier(schema) || !is_valid_identifier(table) {
            return None;
        }
        Some(Self {
            name: format!("{}.{}", schema, table),
            dot: schema.len(),
        })
    }

    /// Parse a `schema.table` reference. Exactly one dot is allowed.
    pub fn parse(value: &str) -> Option<Self> {
        let (schema, table) = value.split_once('.')?;
        Self::new(schema, table)
    }

    /// The schema half.
    pub fn schema(&self) -> &str {
        &self.name[..self.dot]
    }

    /// The table half.
    pub fn table(&self) -> &str {
        &self.name[self.dot + 1..]
    }

    /// Return the qualified name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

// Equality, ordering and hashing go through the full string only so that
// `Borrow<str>` lookups in maps and sets agree with `str`.
impl PartialEq for AssetName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for AssetName {}

impl PartialOrd for AssetName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AssetName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for AssetName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Deref for AssetName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.name
    }
}

impl Borrow<str> for AssetName {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl FromStr for AssetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("'{}' is not a schema.table name", s))
    }
}

impl PartialEq<str> for AssetName {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for AssetName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl PartialEq<String> for AssetName {
    fn eq(&self, other: &String) -> bool {
        self.name == *other
    }
}

impl Serialize for AssetName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for AssetName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
