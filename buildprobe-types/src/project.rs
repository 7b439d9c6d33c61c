use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declarative description of one project inside a fixture.
///
/// Projects reference each other **by name** within the same [`FixtureSpec`],
/// so the reference graph can share nodes and the whole spec serializes
/// cleanly to a scenario file. The graph must be acyclic; the fixture
/// builder rejects cycles before touching the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Project name, unique within the fixture. Doubles as the directory name.
    pub name: String,

    /// Target identifiers, in declaration order (e.g. platform monikers).
    #[serde(default)]
    pub targets: Vec<String>,

    /// Source files to write verbatim: relative path -> contents.
    /// Zero source files is legal (an empty library).
    #[serde(default)]
    pub sources: BTreeMap<String, String>,

    /// Names of other projects in the same fixture this project depends on.
    #[serde(default)]
    pub references: Vec<String>,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
            sources: BTreeMap::new(),
            references: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn with_source(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.sources.insert(path.into(), contents.into());
        self
    }

    pub fn with_reference(mut self, name: impl Into<String>) -> Self {
        self.references.push(name.into());
        self
    }
}

/// A set of related projects materialized together as one fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSpec {
    #[serde(default)]
    pub projects: Vec<ProjectSpec>,

    /// The project the build is run against. Defaults to the last project,
    /// which by convention is the root of the reference graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl FixtureSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: ProjectSpec) -> Self {
        self.projects.push(project);
        self
    }

    pub fn project(&self, name: &str) -> Option<&ProjectSpec> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Resolved entry project name, if the fixture is non-empty.
    pub fn entry_name(&self) -> Option<&str> {
        self.entry
            .as_deref()
            .or_else(|| self.projects.last().map(|p| p.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn entry_defaults_to_last_project() {
        let spec = FixtureSpec::new()
            .with_project(ProjectSpec::new("Lib"))
            .with_project(ProjectSpec::new("App").with_reference("Lib"));
        assert_eq!(spec.entry_name(), Some("App"));
    }

    #[test]
    fn explicit_entry_wins() {
        let mut spec = FixtureSpec::new()
            .with_project(ProjectSpec::new("Lib"))
            .with_project(ProjectSpec::new("App"));
        spec.entry = Some("Lib".to_string());
        assert_eq!(spec.entry_name(), Some("Lib"));
    }

    #[test]
    fn empty_fixture_has_no_entry() {
        assert_eq!(FixtureSpec::new().entry_name(), None);
    }

    #[test]
    fn project_lookup_by_name() {
        let spec = FixtureSpec::new().with_project(
            ProjectSpec::new("Lib")
                .with_target("net8.0")
                .with_source("Lib.cs", "class Lib {}"),
        );
        let lib = spec.project("Lib").unwrap();
        assert_eq!(lib.targets, vec!["net8.0"]);
        assert!(spec.project("Missing").is_none());
    }
}
