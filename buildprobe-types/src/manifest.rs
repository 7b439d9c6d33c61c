use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// The build tool's dependency manifest, as found next to its output.
///
/// buildprobe only spot-checks this document; it is *tolerant* on read:
/// - Unknown fields are ignored.
/// - Optional fields may be absent.
///
/// The one hard requirement is the `compileLibraries` key: a manifest
/// without it is malformed, never silently treated as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyManifest {
    /// Schema identifier, e.g. "deps.manifest.v1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Libraries resolved for compilation. Required; may be empty.
    pub compile_libraries: Vec<LibraryEntry>,

    /// Libraries resolved for the runtime closure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtime_libraries: Vec<LibraryEntry>,

    /// Optional, tool-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Utf8PathBuf>,
}
