//! Serde round-trip and tolerance tests for the shared types.

use buildprobe_types::manifest::DependencyManifest;
use buildprobe_types::project::{FixtureSpec, ProjectSpec};
use pretty_assertions::assert_eq;

#[test]
fn fixture_spec_round_trips_through_json() {
    let spec = FixtureSpec::new()
        .with_project(
            ProjectSpec::new("Lib")
                .with_target("net8.0")
                .with_source("Lib.cs", "public class Lib {}"),
        )
        .with_project(ProjectSpec::new("App").with_reference("Lib"));

    let json = serde_json::to_string(&spec).unwrap();
    let back: FixtureSpec = serde_json::from_str(&json).unwrap();

    assert_eq!(back.projects.len(), 2);
    assert_eq!(back.projects[0].name, "Lib");
    assert_eq!(back.projects[1].references, vec!["Lib"]);
}

#[test]
fn project_spec_fields_default_when_absent() {
    let p: ProjectSpec = serde_json::from_str(r#"{ "name": "Bare" }"#).unwrap();
    assert_eq!(p.name, "Bare");
    assert!(p.targets.is_empty());
    assert!(p.sources.is_empty());
    assert!(p.references.is_empty());
}

#[test]
fn manifest_parses_with_minimal_fields() {
    let json = r#"{ "compileLibraries": [ { "name": "Newtonsoft.Json" } ] }"#;
    let m: DependencyManifest = serde_json::from_str(json).unwrap();
    assert_eq!(m.compile_libraries.len(), 1);
    assert_eq!(m.compile_libraries[0].name, "Newtonsoft.Json");
    assert!(m.compile_libraries[0].version.is_none());
    assert!(m.runtime_libraries.is_empty());
}

#[test]
fn manifest_tolerates_unknown_fields() {
    let json = r#"{
        "schema": "deps.manifest.v1",
        "compileLibraries": [],
        "runtimeLibraries": [ { "name": "lib", "version": "1.0.0" } ],
        "targets": { "anything": "goes" },
        "signature": [1, 2, 3]
    }"#;
    let m: DependencyManifest = serde_json::from_str(json).unwrap();
    assert_eq!(m.schema.as_deref(), Some("deps.manifest.v1"));
    assert!(m.compile_libraries.is_empty());
    assert_eq!(m.runtime_libraries.len(), 1);
}

#[test]
fn manifest_missing_compile_libraries_is_an_error() {
    let json = r#"{ "schema": "deps.manifest.v1", "runtimeLibraries": [] }"#;
    assert!(serde_json::from_str::<DependencyManifest>(json).is_err());
}
