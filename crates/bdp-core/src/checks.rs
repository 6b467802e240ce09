//! Static validation rules run without touching the database

use crate::asset::{parse_dependencies, Asset};
use crate::asset_name::AssetName;
use crate::dag::{resolve_dependencies, AssetDag};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A validation rule, in the order rules are run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRule {
    FileNameMatches,
    DependenciesExist,
    NoCycles,
    NonEmptyBodies,
    NoDuplicateDependencies,
}

impl CheckRule {
    /// Every rule in run order
    pub const ALL: [CheckRule; 5] = [
        CheckRule::FileNameMatches,
        CheckRule::DependenciesExist,
        CheckRule::NoCycles,
        CheckRule::NonEmptyBodies,
        CheckRule::NoDuplicateDependencies,
    ];

    /// Human-readable rule name
    pub fn label(self) -> &'static str {
        match self {
            Self::FileNameMatches => "File name matches dataset.name",
            Self::DependenciesExist => "All dependencies exist",
            Self::NoCycles => "No dependency cycles",
            Self::NonEmptyBodies => "Asset files have content beyond metadata",
            Self::NoDuplicateDependencies => "No duplicate dependencies",
        }
    }

    fn evaluate(self, assets: &BTreeMap<AssetName, Asset>) -> Vec<String> {
        match self {
            Self::FileNameMatches => assets
                .values()
                .filter(|a| a.path.file_stem().and_then(|s| s.to_str()) != Some(a.table()))
                .map(|a| format!("{}: file name does not match table '{}'", a.path.display(), a.table()))
                .collect(),
            Self::DependenciesExist => match resolve_dependencies(assets) {
                Ok(_) => Vec::new(),
                Err(e) => vec![e.to_string()],
            },
            Self::NoCycles => {
                let result = resolve_dependencies(assets)
                    .and_then(|deps| AssetDag::build(&deps))
                    .and_then(|dag| dag.topological_order());
                match result {
                    Ok(_) => Vec::new(),
                    Err(e) => vec![e.to_string()],
                }
            }
            Self::NonEmptyBodies => assets
                .values()
                .filter(|a| a.body().trim().is_empty())
                .map(|a| format!("{}: no content after metadata", a.path.display()))
                .collect(),
            Self::NoDuplicateDependencies => assets
                .values()
                .flat_map(duplicate_dependencies)
                .collect(),
        }
    }
}

impl fmt::Display for CheckRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one rule
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub rule: CheckRule,
    /// Problems found; empty when the rule passed
    pub problems: Vec<String>,
}

impl CheckOutcome {
    /// Whether the rule passed
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Run every rule in order, stopping after the first failure.
pub fn run_checks(assets: &BTreeMap<AssetName, Asset>) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::new();
    for rule in CheckRule::ALL {
        let outcome = CheckOutcome {
            rule,
            problems: rule.evaluate(assets),
        };
        let passed = outcome.passed();
        log::debug!("Check '{}': {}", rule, if passed { "ok" } else { "failed" });
        outcomes.push(outcome);
        if !passed {
            break;
        }
    }
    outcomes
}

fn duplicate_dependencies(asset: &Asset) -> Vec<String> {
    let declared = match asset.metadata.get("depends") {
        Some(values) => match parse_dependencies(values, &asset.path) {
            Ok(deps) => deps,
            Err(e) => return vec![e.to_string()],
        },
        None => return Vec::new(),
    };

    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut problems = Vec::new();
    for dep in declared {
        if !seen.insert(dep.clone()) && reported.insert(dep.clone()) {
            problems.push(format!(
                "{}: dependency {} declared more than once",
                asset.path.display(),
                dep
            ));
        }
    }
    problems
}

#[cfg(test)]
#[path = "checks_test.rs"]
mod tests;
