//! Compiled-in transform functions.
//!
//! A transform asset is a `.rs` file whose leading `//` comments carry its
//! metadata and whose body defines a function named after its table. The
//! binary includes those files and registers each function under the
//! asset's qualified name.

use bdp_core::{AssetName, Frame, Value};
use bdp_db::{Database, DbError, DbResult};
use std::collections::BTreeMap;
use std::fmt;

/// Error returned by a transform function
pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// What a transform function returns
pub type TransformResult = Result<Frame, TransformError>;

/// Signature every transform function has
pub type TransformFn = fn(&TransformContext<'_>) -> TransformResult;

/// Database access handed to a running transform
pub struct TransformContext<'a> {
    db: &'a dyn Database,
    asset: &'a AssetName,
}

impl<'a> TransformContext<'a> {
    pub fn new(db: &'a dyn Database, asset: &'a AssetName) -> Self {
        Self { db, asset }
    }

    /// The asset being materialized
    pub fn asset(&self) -> &AssetName {
        self.asset
    }

    /// Read a materialized table by `schema.table`
    pub fn table(&self, name: &str) -> DbResult<Frame> {
        let name =
            AssetName::parse(name).ok_or_else(|| DbError::InvalidIdentifier(name.to_string()))?;
        self.db.read_table(name.schema(), name.table())
    }

    /// Run a query and collect its result
    pub fn query(&self, sql: &str) -> DbResult<Frame> {
        self.db.query_frame(sql)
    }

    /// Execute a statement with bound parameters
    pub fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        self.db.execute(sql, params)
    }
}

/// Qualified asset name -> transform function
#[derive(Clone, Default)]
pub struct TransformRegistry {
    entries: BTreeMap<String, TransformFn>,
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func` for `name`, replacing any earlier registration
    pub fn register(&mut self, name: impl Into<String>, func: TransformFn) -> &mut Self {
        self.entries.insert(name.into(), func);
        self
    }

    /// Look up the function for an asset
    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.entries.get(name).copied()
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
