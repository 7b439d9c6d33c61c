use anyhow::Context;
use buildprobe_types::manifest::DependencyManifest;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{Pattern, glob};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone)]
pub enum ManifestLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("format error: {message}")]
    Format { message: String },
}

/// Reads and parses a dependency manifest.
///
/// Missing required keys (notably `compileLibraries`) surface as `Format`
/// errors through serde, the same as syntactically invalid JSON.
pub fn load_manifest(path: &Utf8Path) -> Result<DependencyManifest, ManifestLoadError> {
    debug!(path = %path, "loading dependency manifest");

    let contents = fs::read_to_string(path).map_err(|e| ManifestLoadError::Io {
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| ManifestLoadError::Format {
        message: e.to_string(),
    })
}

/// Locates a dependency manifest under a build output directory.
///
/// Returns the lexically-first `*.deps.json` match for determinism when a
/// multi-target build produced more than one.
pub fn find_manifest(output_dir: &Utf8Path) -> anyhow::Result<Option<Utf8PathBuf>> {
    // Escape the root: output directories can legally contain glob
    // metacharacters (e.g. "out [net8.0]").
    let pattern = format!("{}/**/*.deps.json", Pattern::escape(output_dir.as_str()));

    debug!(pattern = %pattern, "scanning output for manifest");

    let mut matches = Vec::new();
    for entry in glob(&pattern).context("glob **/*.deps.json")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        matches.push(Utf8PathBuf::from(path));
    }

    matches.sort();
    Ok(matches.into_iter().next())
}
