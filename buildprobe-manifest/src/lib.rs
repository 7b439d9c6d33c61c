//! Dependency-manifest ingestion.
//!
//! The external build tool drops a `*.deps.json` next to its output.
//! buildprobe only spot-checks that document, so the loader is tolerant of
//! extra fields, but a file that is not valid JSON or is missing the
//! compile-libraries key is a hard `Format` error, never an empty default.

mod load;

pub use load::{ManifestLoadError, find_manifest, load_manifest};
