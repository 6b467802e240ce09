//! CLI command implementations

pub(crate) mod check;
pub(crate) mod common;
pub(crate) mod docs;
pub(crate) mod list;
pub(crate) mod materialize;
