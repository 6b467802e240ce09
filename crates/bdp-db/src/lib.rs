//! bdp-db - Database layer for bdp
//!
//! This crate provides the `Database` trait consumed by the materializer and
//! the docs renderer, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{ColumnInfo, Database};
