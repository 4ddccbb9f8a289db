//! Rendering of results for humans and machines.
//!
//! - [`terminal`]: colored, human-readable summaries
//! - [`json`]: compact and pretty JSON via `serde_json`

pub mod json;
pub mod terminal;
