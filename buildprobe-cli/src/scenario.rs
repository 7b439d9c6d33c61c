//! Scenario files: a fixture spec plus declarative build-file patches,
//! written as TOML.

use anyhow::Context;
use buildprobe_fixture::Materializer;
use buildprobe_types::project::FixtureSpec;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub fixture: FixtureSpec,

    /// Raw dependency declarations appended to a project's build file after
    /// generation, for exercising entries the templater does not model.
    #[serde(default)]
    pub patches: Vec<RawDependency>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDependency {
    /// Project whose build file gets the entry.
    pub project: String,
    /// Dependency name as the build tool expects it.
    pub dependency: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

pub fn load_scenario(path: &Utf8Path) -> anyhow::Result<Scenario> {
    let contents =
        fs_err::read_to_string(path).with_context(|| format!("read scenario {path}"))?;
    toml::from_str(&contents).with_context(|| format!("parse scenario {path}"))
}

/// Builds a materializer with the scenario's patches registered.
///
/// Patch targets are cross-checked against the fixture's projects, the same
/// way the materializer rejects dangling references.
pub fn materializer_for(
    scenario: &Scenario,
    out: Utf8PathBuf,
    unique: bool,
) -> anyhow::Result<Materializer> {
    for raw in &scenario.patches {
        if scenario.fixture.project(&raw.project).is_none() {
            anyhow::bail!("patch references unknown project: {}", raw.project);
        }
    }

    let mut materializer = Materializer::new(out);
    if unique {
        materializer = materializer.with_unique_root();
    }

    for raw in scenario.patches.clone() {
        materializer = materializer.patch_build_file(raw.project.clone(), move |doc| {
            if let Some(path) = &raw.path {
                let mut dep = toml_edit::InlineTable::new();
                dep.insert("path", path.as_str().into());
                doc["dependencies"][raw.dependency.as_str()] = toml_edit::value(dep);
            } else {
                let version = raw.version.as_deref().unwrap_or("*");
                doc["dependencies"][raw.dependency.as_str()] = toml_edit::value(version);
            }
        });
    }

    Ok(materializer)
}
