//! Error types for bdp-run

use bdp_core::{CoreError, FrameError};
use bdp_db::DbError;
use thiserror::Error;

/// Errors raised while materializing an asset
#[derive(Error, Debug)]
pub enum MaterializeError {
    /// R001: Query asset has nothing after its metadata
    #[error("[R001] Query asset {asset} is empty: {path}")]
    EmptyQuery { asset: String, path: String },

    /// R002: No compiled-in function for a transform asset
    #[error("[R002] Transform asset {path} must define function {table} (no transform registered for {asset})")]
    MissingTransform {
        asset: String,
        path: String,
        table: String,
    },

    /// R003: Transform function returned an error
    #[error("[R003] Transform {asset} failed ({path}): {message}")]
    TransformFailed {
        asset: String,
        path: String,
        message: String,
    },

    /// R004: Transform produced a wrongly shaped frame
    #[error("[R004] Transform {asset} returned an invalid frame ({path}): {source}")]
    InvalidFrame {
        asset: String,
        path: String,
        source: FrameError,
    },

    /// R005: Script interpreter could not be started
    #[error("[R005] Failed to run '{interpreter}' for {path}: {source}")]
    ScriptSpawn {
        path: String,
        interpreter: String,
        source: std::io::Error,
    },

    /// R006: Script exited with a non-zero status
    #[error("[R006] Script {path} failed (exit {exit_code}):\n{stderr}")]
    ScriptFailed {
        asset: String,
        path: String,
        exit_code: i32,
        stderr: String,
    },

    /// R007: Script finished without creating its table
    #[error("[R007] Asset {path} did not create {table}")]
    TableNotCreated { path: String, table: String },

    /// R008: Database operation failed for an asset
    #[error("[R008] Database error while materializing {asset} ({path}): {source}")]
    Database {
        asset: String,
        path: String,
        source: DbError,
    },

    /// Discovery, graph, or selection error raised while planning
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for MaterializeError
pub type MaterializeResult<T> = Result<T, MaterializeError>;
