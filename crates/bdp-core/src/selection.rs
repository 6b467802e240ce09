//! Selection resolution: requested assets plus their transitive dependencies

use crate::asset_name::AssetName;
use crate::dag::DependencyMap;
use crate::error::{CoreError, CoreResult};
use std::collections::BTreeSet;

/// Which assets a materialize request targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every discovered asset
    All,
    /// Explicitly named assets
    Names(Vec<String>),
}

impl Selection {
    /// Build a selection from CLI-style inputs.
    ///
    /// `all` wins over any names. Neither is a usage error rather than an
    /// empty run.
    pub fn from_args(names: &[String], all: bool) -> CoreResult<Self> {
        if all {
            return Ok(Self::All);
        }
        let names: Vec<String> = names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        Ok(Self::Names(names))
    }

    /// Resolve to the closed set of assets to materialize.
    ///
    /// Every requested name must exist; all unknown names are reported in
    /// one error. The result contains every transitive dependency of the
    /// requested assets.
    pub fn resolve(&self, deps_map: &DependencyMap) -> CoreResult<BTreeSet<AssetName>> {
        let mut selected: BTreeSet<AssetName> = match self {
            Self::All => deps_map.keys().cloned().collect(),
            Self::Names(names) => {
                if names.is_empty() {
                    return Err(CoreError::EmptySelection);
                }
                let unknown: BTreeSet<&str> = names
                    .iter()
                    .map(String::as_str)
                    .filter(|n| !deps_map.contains_key(*n))
                    .collect();
                if !unknown.is_empty() {
                    return Err(CoreError::UnknownAssets {
                        names: unknown.into_iter().map(String::from).collect(),
                    });
                }
                names
                    .iter()
                    .filter_map(|n| deps_map.get_key_value(n.as_str()))
                    .map(|(k, _)| k.clone())
                    .collect()
            }
        };

        let mut stack: Vec<AssetName> = selected.iter().cloned().collect();
        while let Some(name) = stack.pop() {
            let Some(deps) = deps_map.get(&name) else {
                continue;
            };
            for dep in deps {
                if selected.insert(dep.clone()) {
                    stack.push(dep.clone());
                }
            }
        }

        log::debug!("Selection resolved to {} assets", selected.len());
        Ok(selected)
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
