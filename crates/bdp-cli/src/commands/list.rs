//! List command implementation

use anyhow::{Context, Result};
use bdp_core::{AssetKind, Project};
use serde::Serialize;

use crate::cli::{GlobalArgs, ListArgs, OutputFormat};
use crate::commands::common;

/// Asset information for display
#[derive(Debug, Serialize)]
pub(crate) struct AssetListing {
    name: String,
    kind: AssetKind,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    depends: Vec<String>,
}

/// Execute the list command
pub fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let project = common::load_project(global)?;
    let listings = collect_listings(&project);

    match args.output {
        OutputFormat::Text => print!("{}", render_text(&listings)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&listings).context("Failed to serialize assets")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Listings sorted by qualified name
pub(crate) fn collect_listings(project: &Project) -> Vec<AssetListing> {
    project
        .assets
        .values()
        .map(|asset| AssetListing {
            name: asset.name.to_string(),
            kind: asset.kind,
            path: common::display_path(project, asset),
            description: asset.description.clone(),
            depends: asset.depends.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

/// Text listing with dependencies drawn as a tree
pub(crate) fn render_text(listings: &[AssetListing]) -> String {
    if listings.is_empty() {
        return "No assets found.\n".to_string();
    }

    let mut out = String::new();
    for listing in listings {
        out.push_str(&format!(
            "- {} [{}] ({})\n",
            listing.name, listing.kind, listing.path
        ));
        if let Some(description) = &listing.description {
            out.push_str(&format!("  description: {}\n", description));
        }
        for (i, dep) in listing.depends.iter().enumerate() {
            let connector = if i + 1 == listing.depends.len() {
                "└─"
            } else {
                "├─"
            };
            out.push_str(&format!("  {} {}\n", connector, dep));
        }
    }
    out
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
