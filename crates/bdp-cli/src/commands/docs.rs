//! Docs command implementation - static HTML from materialized tables

use anyhow::{bail, Context, Result};
use bdp_core::{Asset, AssetKind, Metadata, Project, Value};
use bdp_db::{ColumnInfo, Database};
use std::fs;
use std::path::Path;

use crate::cli::{DocsArgs, GlobalArgs};
use crate::commands::common;

/// Metadata keys shown first, in this order
const PREFERRED_KEYS: &[&str] = &["name", "schema", "description", "depends"];

/// Everything rendered for one asset
#[derive(Debug)]
pub(crate) struct AssetDoc<'a> {
    name: String,
    kind: AssetKind,
    path: String,
    description: Option<&'a str>,
    metadata: &'a Metadata,
    columns: Vec<ColumnInfo>,
    row_count: usize,
    sample_columns: Vec<String>,
    sample_rows: Vec<Vec<Value>>,
}

/// Execute the docs command
pub fn execute(args: &DocsArgs, global: &GlobalArgs) -> Result<()> {
    let project = common::load_project(global)?;
    if project.assets.is_empty() {
        bail!("No assets found.");
    }
    let db = common::open_database(global, &project)?;

    let mut docs = Vec::with_capacity(project.assets.len());
    for asset in project.assets.values() {
        docs.push(collect_asset_doc(&project, &db, asset, args.sample_rows)?);
    }

    let html = render_document(&project.config.metadata_namespace, &docs);
    let out = Path::new(&args.out);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(out, html).with_context(|| format!("Failed to write {}", out.display()))?;

    println!("Documentation for {} assets written to {}", docs.len(), out.display());
    Ok(())
}

fn collect_asset_doc<'a>(
    project: &Project,
    db: &dyn Database,
    asset: &'a Asset,
    sample_rows: usize,
) -> Result<AssetDoc<'a>> {
    let (schema, table) = (asset.schema(), asset.table());
    if !db.table_exists(schema, table)? {
        bail!("Missing table {}. Run `bdp materialize`.", asset.name);
    }
    let columns = db
        .columns_of(schema, table)
        .with_context(|| format!("Failed to read columns of {}", asset.name))?;
    let row_count = db
        .row_count(schema, table)
        .with_context(|| format!("Failed to count rows of {}", asset.name))?;
    let (sample_columns, sample_rows) = db
        .sample_rows(schema, table, sample_rows)
        .with_context(|| format!("Failed to sample {}", asset.name))?;

    Ok(AssetDoc {
        name: asset.name.to_string(),
        kind: asset.kind,
        path: common::display_path(project, asset),
        description: asset.description.as_deref(),
        metadata: &asset.metadata,
        columns,
        row_count,
        sample_columns,
        sample_rows,
    })
}

/// Render the full HTML page
pub(crate) fn render_document(namespace: &str, docs: &[AssetDoc<'_>]) -> String {
    let index = docs
        .iter()
        .map(|d| {
            let name = html_escape(&d.name);
            format!("      <li><a href=\"#{name}\">{name}</a></li>")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let sections = docs
        .iter()
        .map(|d| render_section(namespace, d))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>bdp docs</title>
  <style>
    body {{ font-family: ui-monospace, Menlo, Consolas, monospace; color: #111; margin: 0; padding: 24px; line-height: 1.5 }}
    .layout {{ display: grid; grid-template-columns: 240px 1fr; gap: 24px; align-items: start }}
    main {{ max-width: 980px; min-width: 0 }}
    aside {{ position: sticky; top: 24px }}
    ul {{ list-style: none; padding: 0; margin: 8px 0 0 }}
    a {{ color: inherit; text-decoration: none; border-bottom: 1px solid #ddd }}
    section {{ background: #fafafa; border: 1px solid #eee; border-radius: 6px; padding: 16px; margin: 0 0 16px }}
    table {{ border-collapse: collapse; width: 100%; margin: 8px 0 16px }}
    th, td {{ text-align: left; padding: 4px 6px; border-bottom: 1px solid #eee; vertical-align: top }}
    .small {{ color: #666; font-size: 12px }}
    @media (max-width: 900px) {{ .layout {{ grid-template-columns: 1fr }} aside {{ position: static }} }}
  </style>
</head>
<body>
<div class="layout">
  <aside>
    <div class="small">Assets</div>
    <ul>
{index}
    </ul>
  </aside>
  <main>
    <h1>Asset docs</h1>
    <p class="small">Generated from materialized tables. Run bdp docs after bdp materialize.</p>
{sections}
  </main>
</div>
</body>
</html>
"#
    )
}

fn render_section(namespace: &str, doc: &AssetDoc<'_>) -> String {
    let name = html_escape(&doc.name);
    let description = match doc.description {
        Some(d) => format!("<p>{}</p>", html_escape(d)),
        None => "<div class=\"small\">No description.</div>".to_string(),
    };
    format!(
        "<section id=\"{name}\">\n  <h2>{name}</h2>\n  <div class=\"small\">{kind} · {path}</div>\n  {description}\n  <h3>Metadata</h3>\n{metadata}\n  <h3>Columns</h3>\n{columns}\n  <div class=\"small\">Rows: {rows}</div>\n  <h3>Sample</h3>\n{sample}\n</section>",
        kind = doc.kind,
        path = html_escape(&doc.path),
        metadata = render_metadata_table(namespace, doc.metadata),
        columns = render_columns_table(&doc.columns),
        rows = doc.row_count,
        sample = render_sample_table(&doc.sample_columns, &doc.sample_rows),
    )
}

/// Metadata keys in display order: preferred keys first, then the rest sorted
fn ordered_keys(metadata: &Metadata) -> Vec<&str> {
    let mut keys: Vec<&str> = PREFERRED_KEYS
        .iter()
        .copied()
        .filter(|k| metadata.contains_key(k))
        .collect();
    // Metadata iterates in key order already
    keys.extend(
        metadata
            .iter()
            .map(|(k, _)| k)
            .filter(|k| !PREFERRED_KEYS.contains(k)),
    );
    keys
}

fn render_metadata_table(namespace: &str, metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return "  <div class=\"small\">No metadata.</div>".to_string();
    }
    let rows = ordered_keys(metadata)
        .into_iter()
        .map(|key| {
            let values = metadata.get(key).unwrap_or_default();
            let value = if key == "depends" {
                render_depends(values)
            } else {
                html_escape(&values.join(", "))
            };
            format!(
                "      <tr><td><code>{}.{}</code></td><td>{}</td></tr>",
                html_escape(namespace),
                html_escape(key),
                value
            )
        })
        .collect::<Vec<_>>();
    table(&["Key", "Value"], &rows)
}

fn render_depends(values: &[String]) -> String {
    values
        .iter()
        .flat_map(|raw| raw.split(','))
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            let d = html_escape(d);
            format!("<a href=\"#{d}\">{d}</a>")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_columns_table(columns: &[ColumnInfo]) -> String {
    if columns.is_empty() {
        return "  <div class=\"small\">No columns.</div>".to_string();
    }
    let rows = columns
        .iter()
        .map(|c| {
            format!(
                "      <tr><td>{}</td><td>{}</td></tr>",
                html_escape(&c.name),
                html_escape(&c.data_type)
            )
        })
        .collect::<Vec<_>>();
    table(&["Column", "Type"], &rows)
}

fn render_sample_table(columns: &[String], rows: &[Vec<Value>]) -> String {
    if columns.is_empty() {
        return "  <div class=\"small\">No sample available.</div>".to_string();
    }
    if rows.is_empty() {
        return "  <div class=\"small\">No rows.</div>".to_string();
    }
    let headers: Vec<&str> = columns.iter().map(String::as_str).collect();
    let rows = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|v| format!("<td>{}</td>", html_escape(&v.to_string())))
                .collect();
            format!("      <tr>{}</tr>", cells)
        })
        .collect::<Vec<_>>();
    table(&headers, &rows)
}

fn table(headers: &[&str], rows: &[String]) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", html_escape(h)))
        .collect();
    format!(
        "  <table>\n    <thead>\n      <tr>{}</tr>\n    </thead>\n    <tbody>\n{}\n    </tbody>\n  </table>",
        head,
        rows.join("\n")
    )
}

/// Escape a string for HTML text and attribute values.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
#[path = "docs_test.rs"]
mod tests;
