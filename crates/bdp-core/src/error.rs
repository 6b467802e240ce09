//! Error types for bdp-core

use thiserror::Error;

/// Core error type for bdp
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Failed to parse configuration file
    #[error("[E001] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Datasets directory not found
    #[error("[E003] Datasets directory not found (searched from {path})")]
    DatasetsNotFound { path: String },

    /// E101: Asset file has no metadata block
    #[error("[E101] Missing {namespace} metadata in {path}")]
    MissingMetadata { path: String, namespace: String },

    /// E102: A metadata line mentions the namespace but is malformed
    #[error("[E102] Invalid metadata line in {path}: {line}")]
    InvalidMetadataLine { path: String, line: String },

    /// E103: Required metadata key absent
    #[error("[E103] Missing {key} in {path}")]
    MissingMetadataKey { path: String, key: String },

    /// E104: Single-valued metadata key declared more than once
    #[error("[E104] {key} must appear once in {path}")]
    DuplicateMetadataKey { path: String, key: String },

    /// E105: Metadata key declared without a value
    #[error("[E105] {key} must have a value in {path}")]
    EmptyMetadataValue { path: String, key: String },

    /// E106: Schema or table is not a valid identifier
    #[error("[E106] Invalid {label} name '{value}' from {path}")]
    InvalidIdentifier {
        path: String,
        label: String,
        value: String,
    },

    /// E107: Dependency reference is not `schema.table`
    #[error("[E107] Invalid dependency '{value}' in {path}. Expected schema.table")]
    InvalidDependency { path: String, value: String },

    /// E108: Two asset files resolve to the same qualified name
    #[error("[E108] Duplicate asset name {name}: {first} and {second}")]
    DuplicateAsset {
        name: String,
        first: String,
        second: String,
    },

    /// E109: File extension does not map to an asset kind
    #[error("[E109] Not an asset file (expected .sql, .rs or .sh): {path}")]
    UnsupportedAsset { path: String },

    /// E201: Asset lists itself as a dependency
    #[error("[E201] Asset {asset} depends on itself ({path})")]
    SelfDependency { asset: String, path: String },

    /// E202: Asset depends on something that was never discovered
    #[error("[E202] Unknown dependency '{dependency}' of {asset} referenced in {path}")]
    UnknownDependency {
        asset: String,
        dependency: String,
        path: String,
    },

    /// E203: Circular dependency detected
    #[error("[E203] Dependency cycle detected: {cycle}")]
    CircularDependency { cycle: String },

    /// E301: Neither asset names nor the all flag were given
    #[error("[E301] Pass --all or asset names to materialize")]
    EmptySelection,

    /// E302: Requested assets that do not exist
    #[error("[E302] Unknown assets: {}", names.join(", "))]
    UnknownAssets { names: Vec<String> },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
