//! CLI command implementations

pub(crate) mod apps;
pub(crate) mod common;
pub(crate) mod fields;
pub(crate) mod schema;
pub(crate) mod serve;
