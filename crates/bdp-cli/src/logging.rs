//! stderr logging for library diagnostics.
//!
//! Warnings are always shown. With `--verbose`, debug and info records from
//! the bdp crates are shown too, prefixed `[verbose]`.

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::io::Write;

/// Log targets of the workspace crates
const BDP_TARGETS: &[&str] = &["bdp", "bdp_core", "bdp_db", "bdp_run"];

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "[error]",
        Level::Warn => "[warn]",
        _ => "[verbose]",
    }
}

/// Logger configuration for the given verbosity
fn builder(verbose: bool) -> Builder {
    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .format(|buf, record| writeln!(buf, "{} {}", prefix(record.level()), record.args()));
    if verbose {
        for target in BDP_TARGETS {
            builder.filter_module(target, LevelFilter::Debug);
        }
    }
    builder
}

/// Install the logger. Later calls are ignored.
pub(crate) fn init(verbose: bool) {
    let _ = builder(verbose).try_init();
}
