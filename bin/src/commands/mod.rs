//! CLI command implementations.

pub(crate) mod download;
pub(crate) mod series;
pub(crate) mod stations;
