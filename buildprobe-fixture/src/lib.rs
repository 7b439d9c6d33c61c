//! Fixture builder for buildprobe.
//!
//! Responsibilities:
//! - Validate a [`FixtureSpec`] (duplicate names, dangling references,
//!   reference cycles) before any filesystem write.
//! - Materialize projects in reference order, leaves first, so a generated
//!   build file never points at a directory that does not exist yet.
//! - Generate each project's build file with `toml_edit` and apply
//!   registered post-generation patches to the structured tree.

mod buildfile;
mod error;
mod graph;

pub use buildfile::{BUILD_FILE_NAME, BuildFilePatch};
pub use error::{FixtureError, FixtureResult};

use buildprobe_types::project::FixtureSpec;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use toml_edit::DocumentMut;
use tracing::debug;
use uuid::Uuid;

/// Materializes fixture specs under a caller-owned root directory.
///
/// The root's lifecycle is external: tests typically hand in a tempdir and
/// let it clean up, or keep the tree around for inspection on failure.
pub struct Materializer {
    root: Utf8PathBuf,
    unique_root: bool,
    patches: BTreeMap<String, Vec<BuildFilePatch>>,
}

impl std::fmt::Debug for Materializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer")
            .field("root", &self.root)
            .field("unique_root", &self.unique_root)
            .field("patches", &self.patches.keys())
            .finish()
    }
}

impl Materializer {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            unique_root: false,
            patches: BTreeMap::new(),
        }
    }

    /// Materialize into a uuid-suffixed subdirectory of the root, so
    /// repeated runs against a shared root never collide.
    pub fn with_unique_root(mut self) -> Self {
        self.unique_root = true;
        self
    }

    /// Register a patch applied to `project`'s build file after structural
    /// generation. Patches run in registration order and may override or
    /// extend anything the generator templated.
    pub fn patch_build_file(
        mut self,
        project: impl Into<String>,
        patch: impl Fn(&mut DocumentMut) + Send + Sync + 'static,
    ) -> Self {
        self.patches
            .entry(project.into())
            .or_default()
            .push(Box::new(patch));
        self
    }

    /// Writes the fixture to disk and returns the resulting layout.
    ///
    /// Validation failures (`Precondition`) are raised before any write, so
    /// a rejected spec leaves no partial tree behind.
    pub fn materialize(&self, spec: &FixtureSpec) -> FixtureResult<MaterializedFixture> {
        let order = graph::materialization_order(spec)?;

        let root = if self.unique_root {
            self.root.join(format!("fixture-{}", Uuid::new_v4()))
        } else {
            self.root.clone()
        };

        fs::create_dir_all(&root).map_err(|e| FixtureError::Filesystem {
            path: root.clone(),
            message: e.to_string(),
        })?;

        let mut project_dirs = BTreeMap::new();
        let mut ordered_names = Vec::with_capacity(order.len());

        for idx in order {
            let project = &spec.projects[idx];
            let dir = root.join(&project.name);
            debug!(project = %project.name, dir = %dir, "materializing project");

            fs::create_dir_all(&dir).map_err(|e| FixtureError::Filesystem {
                path: dir.clone(),
                message: e.to_string(),
            })?;

            for (rel, contents) in &project.sources {
                let path = dir.join(rel);
                write_template(&path, contents)?;
            }

            let mut doc = buildfile::render(project);
            if let Some(patches) = self.patches.get(&project.name) {
                for patch in patches {
                    patch(&mut doc);
                }
            }
            write_template(&dir.join(BUILD_FILE_NAME), &doc.to_string())?;

            ordered_names.push(project.name.clone());
            project_dirs.insert(project.name.clone(), dir);
        }

        Ok(MaterializedFixture {
            root,
            project_dirs,
            order: ordered_names,
        })
    }
}

fn write_template(path: &Utf8Path, contents: &str) -> FixtureResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FixtureError::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    fs::write(path, contents).map_err(|e| FixtureError::Template {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// An on-disk fixture produced by [`Materializer::materialize`].
#[derive(Debug, Clone)]
pub struct MaterializedFixture {
    /// Root directory of the fixture tree.
    pub root: Utf8PathBuf,
    project_dirs: BTreeMap<String, Utf8PathBuf>,
    order: Vec<String>,
}

impl MaterializedFixture {
    pub fn project_dir(&self, name: &str) -> Option<&Utf8Path> {
        self.project_dirs.get(name).map(Utf8PathBuf::as_path)
    }

    /// Project names in the order they were written, references first.
    pub fn materialization_order(&self) -> &[String] {
        &self.order
    }
}
