//! CLI command implementations.

pub mod airspaces;
pub mod analyze;
pub mod batch;
pub mod common;
pub mod config;
