//! Shared building blocks for the logman crates: log setup, wire types and
//! pagination parameters.

pub mod types;
pub mod utils;
pub mod pagination;

/// Application name reported by the index endpoint and in startup logs.
pub const APPLICATION: &str = "logman";
