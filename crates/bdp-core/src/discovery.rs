//! Asset discovery over a datasets directory tree

use crate::asset::{Asset, AssetKind};
use crate::asset_name::AssetName;
use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File names starting with this prefix are never assets.
pub const RESERVED_PREFIX: char = '_';

/// Directories holding interpreter caches; nothing below them is scanned.
pub const CACHE_DIRS: &[&str] = &["__pycache__"];

/// Discover every asset below `root`, keyed by qualified name.
///
/// Fails on the first file whose metadata is invalid, and when two files
/// declare the same `schema.table`.
pub fn discover_assets(root: &Path, namespace: &str) -> CoreResult<BTreeMap<AssetName, Asset>> {
    let mut assets: BTreeMap<AssetName, Asset> = BTreeMap::new();

    for path in asset_files(root)? {
        let asset = Asset::from_file(&path, namespace)?;
        if let Some(existing) = assets.get(&asset.name) {
            return Err(CoreError::DuplicateAsset {
                name: asset.name.to_string(),
                first: existing.path.display().to_string(),
                second: asset.path.display().to_string(),
            });
        }
        assets.insert(asset.name.clone(), asset);
    }

    log::debug!("Discovered {} assets under {}", assets.len(), root.display());
    Ok(assets)
}

/// List candidate asset files below `root`, sorted by path.
pub fn asset_files(root: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    collect_asset_files(root, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_asset_files(dir: &Path, paths: &mut Vec<PathBuf>) -> CoreResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        // Symlinked directories are not followed
        if entry.file_type()?.is_dir() {
            if CACHE_DIRS.contains(&file_name.as_ref()) {
                continue;
            }
            collect_asset_files(&path, paths)?;
        } else if !path.is_dir() && is_asset_file(&path, &file_name) {
            paths.push(path);
        }
    }

    Ok(())
}

fn is_asset_file(path: &Path, file_name: &str) -> bool {
    !file_name.starts_with(RESERVED_PREFIX) && AssetKind::from_path(path).is_some()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
