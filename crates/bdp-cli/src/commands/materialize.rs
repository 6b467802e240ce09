//! Materialize command implementation

use anyhow::{Context, Result};
use bdp_core::Selection;
use bdp_run::{AssetRunResult, RunStatus};

use crate::cli::{GlobalArgs, MaterializeArgs, OutputFormat};
use crate::commands::common;
use crate::transforms;

/// Execute the materialize command
pub fn execute(args: &MaterializeArgs, global: &GlobalArgs) -> Result<()> {
    let selection = Selection::from_args(&args.assets, args.all)?;
    let project = common::load_project(global)?;
    let db = common::open_database(global, &project)?;
    let registry = transforms::registry();
    let text = args.output == OutputFormat::Text;

    let outcome = bdp_run::materialize(&project, &db, &selection, &registry, |result| {
        if text {
            println!("{}", format_result(result));
        }
    })
    .context("Failed to plan materialization")?;

    let results = &outcome.results;
    if text {
        println!(
            "\nCompleted: {} succeeded, {} failed ({:.2}s)",
            results.success_count, results.failure_count, results.elapsed_secs
        );
    } else {
        let json =
            serde_json::to_string_pretty(results).context("Failed to serialize run results")?;
        println!("{}", json);
    }

    match outcome.failure {
        Some(err) => Err(err).context("Materialization stopped"),
        None => Ok(()),
    }
}

/// One progress line, e.g. `✓ raw.a [query] (0.01s)`
fn format_result(result: &AssetRunResult) -> String {
    let mark = match result.status {
        RunStatus::Success => "✓",
        RunStatus::Error => "✗",
    };
    format!(
        "{} {} [{}] ({:.2}s)",
        mark, result.asset, result.kind, result.duration_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdp_core::AssetKind;

    #[test]
    fn test_format_result() {
        let result = AssetRunResult {
            asset: "raw.a".to_string(),
            kind: AssetKind::Query,
            status: RunStatus::Success,
            duration_secs: 0.0123,
            error: None,
        };
        assert_eq!(format_result(&result), "✓ raw.a [query] (0.01s)");

        let failed = AssetRunResult {
            status: RunStatus::Error,
            kind: AssetKind::Script,
            error: Some("boom".to_string()),
            ..result
        };
        assert_eq!(format_result(&failed), "✗ raw.a [script] (0.01s)");
    }
}
