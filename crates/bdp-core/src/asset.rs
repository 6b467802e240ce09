//! Asset descriptors built from a file's leading metadata block.

use crate::asset_name::AssetName;
use crate::error::{CoreError, CoreResult};
use crate::identifier::validate_identifier;
use crate::metadata::{parse_metadata_lines, split_metadata_block, Metadata};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Execution strategy of an asset, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// `.sql`: a query whose result replaces the target table
    Query,
    /// `.rs`: a compiled-in function returning a frame
    Transform,
    /// `.sh`: an external script that creates the table itself
    Script,
}

impl AssetKind {
    /// Map a file extension (without the dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "sql" => Some(Self::Query),
            "rs" => Some(Self::Transform),
            "sh" => Some(Self::Script),
            _ => None,
        }
    }

    /// Map a path to a kind by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Line-comment prefix used for the metadata block.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Self::Query => "--",
            Self::Transform => "//",
            Self::Script => "#",
        }
    }

    /// Short lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Transform => "transform",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered asset. Built once per run from its file and never mutated.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Qualified `schema.table` name
    pub name: AssetName,

    /// Backing file
    pub path: PathBuf,

    /// Execution strategy
    pub kind: AssetKind,

    /// Raw file contents as read during discovery
    pub source: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Dependencies in declaration order, duplicates removed
    pub depends: Vec<AssetName>,

    /// Every metadata key parsed from the file
    pub metadata: Metadata,

    body_offset: usize,
}

impl Asset {
    /// Read `path` and build its descriptor.
    pub fn from_file(path: &Path, namespace: &str) -> CoreResult<Self> {
        let kind = AssetKind::from_path(path).ok_or_else(|| CoreError::UnsupportedAsset {
            path: path.display().to_string(),
        })?;
        let source = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_source(path.to_path_buf(), kind, source, namespace)
    }

    /// Build a descriptor from already-read source text.
    pub fn from_source(
        path: PathBuf,
        kind: AssetKind,
        source: String,
        namespace: &str,
    ) -> CoreResult<Self> {
        let block = split_metadata_block(&source, kind.comment_prefix());
        let metadata = parse_metadata_lines(&block.lines, namespace, &path)?;
        if metadata.is_empty() {
            return Err(CoreError::MissingMetadata {
                path: path.display().to_string(),
                namespace: namespace.to_string(),
            });
        }

        let schema = metadata.single("schema", &path).map_err(|e| qualify_key(e, namespace))?;
        let table = metadata.single("name", &path).map_err(|e| qualify_key(e, namespace))?;
        validate_identifier(schema, "schema", &path)?;
        validate_identifier(table, "table", &path)?;
        let name = AssetName::new(schema, table).ok_or_else(|| CoreError::InvalidIdentifier {
            path: path.display().to_string(),
            label: "asset".to_string(),
            value: format!("{}.{}", schema, table),
        })?;

        let description = metadata
            .optional_single("description", &path)
            .map_err(|e| qualify_key(e, namespace))?
            .map(str::to_string);

        let declared = parse_dependencies(metadata.get("depends").unwrap_or_default(), &path)?;
        let mut depends: Vec<AssetName> = Vec::with_capacity(declared.len());
        for dep in declared {
            if !depends.contains(&dep) {
                depends.push(dep);
            }
        }

        let body_offset = block.body_offset;
        Ok(Self {
            name,
            path,
            kind,
            source,
            description,
            depends,
            metadata,
            body_offset,
        })
    }

    /// Schema the asset materializes into.
    pub fn schema(&self) -> &str {
        self.name.schema()
    }

    /// Table the asset materializes into.
    pub fn table(&self) -> &str {
        self.name.table()
    }

    /// Source text after the metadata block.
    pub fn body(&self) -> &str {
        &self.source[self.body_offset..]
    }
}

/// Split `depends` values on commas and validate each reference.
///
/// Returns every reference in declaration order, duplicates included.
pub fn parse_dependencies(values: &[String], path: &Path) -> CoreResult<Vec<AssetName>> {
    let mut deps = Vec::new();
    for raw in values {
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (schema, table) = match part.split_once('.') {
                Some((schema, table)) if !table.contains('.') => (schema, table),
                _ => {
                    return Err(CoreError::InvalidDependency {
                        path: path.display().to_string(),
                        value: part.to_string(),
                    })
                }
            };
            validate_identifier(schema, "schema", path)?;
            validate_identifier(table, "table", path)?;
            if let Some(name) = AssetName::new(schema, table) {
                deps.push(name);
            }
        }
    }
    Ok(deps)
}

/// Prefix metadata-key errors with the namespace so messages read
/// `dataset.name` instead of a bare `name`.
fn qualify_key(err: CoreError, namespace: &str) -> CoreError {
    match err {
        CoreError::MissingMetadataKey { path, key } => CoreError::MissingMetadataKey {
            path,
            key: format!("{}.{}", namespace, key),
        },
        CoreError::DuplicateMetadataKey { path, key } => CoreError::DuplicateMetadataKey {
            path,
            key: format!("{}.{}", namespace, key),
        },
        CoreError::EmptyMetadataValue { path, key } => CoreError::EmptyMetadataValue {
            path,
            key: format!("{}.{}", namespace, key),
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "asset_test.rs"]
mod tests;
