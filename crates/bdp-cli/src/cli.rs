//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// bdp - discover annotated data assets and materialize them into DuckDB
#[derive(Parser, Debug)]
#[command(name = "bdp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Database file (overrides bdp.yml)
    #[arg(short, long, global = true, env = "BDP_DB_PATH")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Materialize assets and their dependencies into the database
    Materialize(MaterializeArgs),

    /// List discovered assets
    List(ListArgs),

    /// Validate assets without executing anything
    Check(CheckArgs),

    /// Generate HTML documentation from materialized tables
    Docs(DocsArgs),
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Arguments for the materialize command
#[derive(Args, Debug)]
pub struct MaterializeArgs {
    /// Asset names (schema.table) to materialize
    #[arg(value_name = "ASSET")]
    pub assets: Vec<String>,

    /// Materialize every discovered asset
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Arguments for the docs command
#[derive(Args, Debug)]
pub struct DocsArgs {
    /// Output HTML file
    #[arg(long, default_value = "index.html")]
    pub out: String,

    /// Number of sample rows per asset
    #[arg(long, default_value_t = 10)]
    pub sample_rows: usize,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
