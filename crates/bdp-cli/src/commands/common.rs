//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use bdp_core::config::resolve_db_path;
use bdp_core::{Asset, Project};
use bdp_db::{Database, DuckDbBackend};
use std::fmt;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main never prints it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project named by `--project-dir`
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let project = Project::load(Path::new(&global.project_dir)).context("Failed to load project")?;
    if global.verbose {
        eprintln!(
            "[verbose] Project root: {}, {} assets under {}",
            project.root.display(),
            project.assets.len(),
            project.datasets_root.display()
        );
    }
    Ok(project)
}

/// Database location: `--database` / `BDP_DB_PATH`, then bdp.yml, then the default
pub(crate) fn database_path(global: &GlobalArgs, project: &Project) -> String {
    match &global.database {
        Some(path) => match std::env::current_dir() {
            Ok(cwd) => resolve_db_path(path, &cwd),
            Err(_) => path.clone(),
        },
        None => project.database_path(),
    }
}

/// Open the project database
pub(crate) fn open_database(global: &GlobalArgs, project: &Project) -> Result<DuckDbBackend> {
    let path = database_path(global, project);
    let db = DuckDbBackend::new(&path)
        .with_context(|| format!("Failed to open database {}", path))?;
    if global.verbose {
        eprintln!("[verbose] Using {} database at {}", db.db_type(), db.location());
    }
    Ok(db)
}

/// Path relative to the datasets root, `/`-separated on every platform
pub(crate) fn display_path(project: &Project, asset: &Asset) -> String {
    project
        .relative_path(asset)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
