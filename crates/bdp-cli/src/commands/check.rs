//! Check command implementation

use anyhow::Result;
use bdp_core::{run_checks, CheckOutcome};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::{self, ExitCode};

/// Execute the check command
pub fn execute(_args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let project = common::load_project(global)?;
    let outcomes = run_checks(&project.assets);

    for outcome in &outcomes {
        println!("{}", format_outcome(outcome));
        for problem in &outcome.problems {
            eprintln!("  {}", problem);
        }
    }

    if outcomes.iter().any(|o| !o.passed()) {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

fn format_outcome(outcome: &CheckOutcome) -> String {
    let status = if outcome.passed() { "OK" } else { "FAIL" };
    format!("{}: {}", outcome.rule, status)
}
