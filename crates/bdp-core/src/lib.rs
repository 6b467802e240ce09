//! bdp-core - Core library for bdp
//!
//! Asset discovery from annotated files, metadata parsing, dependency graph
//! validation, selection, and deterministic ordering. Everything here is
//! pure and filesystem-only; executing assets lives in `bdp-run`.

pub mod asset;
pub mod asset_name;
pub mod checks;
pub mod config;
pub mod dag;
pub mod discovery;
pub mod error;
pub mod frame;
pub mod identifier;
pub mod metadata;
pub mod project;
pub mod selection;

pub use asset::{Asset, AssetKind};
pub use asset_name::AssetName;
pub use checks::{run_checks, CheckOutcome, CheckRule};
pub use config::Config;
pub use dag::{AssetDag, DependencyMap};
pub use discovery::discover_assets;
pub use error::{CoreError, CoreResult};
pub use frame::{Column, ColumnData, Frame, FrameError, Value};
pub use identifier::is_valid_identifier;
pub use metadata::Metadata;
pub use project::{Plan, Project};
pub use selection::Selection;
