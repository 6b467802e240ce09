//! Project discovery, loading, and run planning

use crate::asset::Asset;
use crate::asset_name::AssetName;
use crate::config::Config;
use crate::dag::{resolve_dependencies, restrict, AssetDag, DependencyMap};
use crate::discovery::discover_assets;
use crate::error::{CoreError, CoreResult};
use crate::selection::Selection;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A bdp project: config plus every asset discovered under its datasets directory
#[derive(Debug)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,

    /// Project configuration
    pub config: Config,

    /// Directory walked by discovery
    pub datasets_root: PathBuf,

    /// Assets keyed by qualified name
    pub assets: BTreeMap<AssetName, Asset>,
}

/// An ordered set of assets ready to materialize
#[derive(Debug, Clone)]
pub struct Plan {
    /// Dependencies of every discovered asset
    pub dependencies: DependencyMap,

    /// Selected assets in execution order
    pub order: Vec<AssetName>,
}

impl Project {
    /// Load a project from a directory, searching parent directories for the root
    pub fn load(path: &Path) -> CoreResult<Self> {
        let start = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let root = find_root(&start)?;
        let config = Config::load_from_dir(&root)?;
        let datasets_root = config.datasets_path_absolute(&root);
        if !datasets_root.is_dir() {
            return Err(CoreError::DatasetsNotFound {
                path: datasets_root.display().to_string(),
            });
        }

        let assets = discover_assets(&datasets_root, &config.metadata_namespace)?;

        Ok(Self {
            root,
            config,
            datasets_root,
            assets,
        })
    }

    /// Path of an asset file relative to the datasets directory
    pub fn relative_path<'a>(&self, asset: &'a Asset) -> &'a Path {
        asset
            .path
            .strip_prefix(&self.datasets_root)
            .unwrap_or(&asset.path)
    }

    /// Database location from config, resolved against the project root
    pub fn database_path(&self) -> String {
        self.config.database_path_absolute(&self.root)
    }

    /// Validate the whole graph, resolve `selection`, and order it.
    ///
    /// Dangling and self references anywhere in the project fail first;
    /// cycles fail only when they lie inside the selected subgraph.
    pub fn plan(&self, selection: &Selection) -> CoreResult<Plan> {
        plan_assets(&self.assets, selection)
    }
}

/// Build a [`Plan`] over an already-discovered asset map.
pub fn plan_assets(
    assets: &BTreeMap<AssetName, Asset>,
    selection: &Selection,
) -> CoreResult<Plan> {
    let dependencies = resolve_dependencies(assets)?;
    let selected = selection.resolve(&dependencies)?;
    let dag = AssetDag::build(&restrict(&dependencies, &selected))?;
    let order = dag.topological_order()?;
    log::debug!(
        "Execution order: {}",
        order
            .iter()
            .map(AssetName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(Plan {
        dependencies,
        order,
    })
}

/// Walk up from `start` to the first directory holding a config file or a
/// datasets directory.
pub fn find_root(start: &Path) -> CoreResult<PathBuf> {
    for dir in start.ancestors() {
        if Config::find_file(dir).is_some() {
            return Ok(dir.to_path_buf());
        }
        if Config::default().datasets_path_absolute(dir).is_dir() {
            return Ok(dir.to_path_buf());
        }
    }
    Err(CoreError::DatasetsNotFound {
        path: start.display().to_string(),
    })
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
