//! bdp-run - Materializer for bdp
//!
//! Executes a planned asset order against a [`bdp_db::Database`], dispatching
//! on asset kind: queries replace their table, transforms return a frame that
//! is written back, and scripts are run as child processes that must create
//! their own table.

pub mod error;
pub mod execute;
pub mod script;
pub mod transform;

pub use error::{MaterializeError, MaterializeResult};
pub use execute::{AssetRunResult, Materializer, RunOutcome, RunResults, RunStatus};
pub use transform::{
    TransformContext, TransformError, TransformFn, TransformRegistry, TransformResult,
};

use bdp_core::{Project, Selection};
use bdp_db::Database;

/// Plan `selection` over `project` and materialize it.
///
/// Planning errors are returned before any database call. Execution stops at
/// the first failing asset; assets finished before it stay committed.
pub fn materialize(
    project: &Project,
    db: &dyn Database,
    selection: &Selection,
    transforms: &TransformRegistry,
    on_result: impl FnMut(&AssetRunResult),
) -> MaterializeResult<RunOutcome> {
    let plan = project.plan(selection)?;
    let materializer =
        Materializer::new(db, transforms).with_interpreter(&project.config.script_interpreter);
    Ok(materializer.run(&project.assets, &plan.order, on_result))
}
