//! Shared DTOs (schemas-as-code) for the buildprobe workspace.
//!
//! # Design constraints
//! - Fixture specs are intended to be written by hand (scenario TOML files),
//!   so defaults are generous and field names are short.
//! - Manifest types are read-only views of another tool's output; be tolerant.

pub mod manifest;
pub mod project;
