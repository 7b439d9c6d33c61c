//! Build-file generation via `toml_edit`.
//!
//! The generated file is a structured project descriptor the external build
//! tool consumes. Patches operate on the same `DocumentMut` the generator
//! produces, so they can override or extend anything templated.

use buildprobe_types::project::ProjectSpec;
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, value};

/// File name of the generated build file inside each project directory.
pub const BUILD_FILE_NAME: &str = "project.toml";

/// A post-generation transformation over the build file's structured tree.
pub type BuildFilePatch = Box<dyn Fn(&mut DocumentMut) + Send + Sync>;

/// Renders the build file for one project. References become path
/// dependencies pointing at sibling directories, which is why referenced
/// projects must already be materialized when the tool resolves them.
pub(crate) fn render(project: &ProjectSpec) -> DocumentMut {
    let mut doc = DocumentMut::new();

    doc["project"] = Item::Table(Table::new());
    doc["project"]["name"] = value(project.name.as_str());

    let mut targets = Array::new();
    for target in &project.targets {
        targets.push(target.as_str());
    }
    doc["project"]["targets"] = value(targets);

    if !project.references.is_empty() {
        let mut deps = Table::new();
        for reference in &project.references {
            let mut dep = InlineTable::new();
            dep.insert("path", format!("../{reference}").into());
            deps[reference.as_str()] = value(dep);
        }
        doc["dependencies"] = Item::Table(deps);
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::render;
    use buildprobe_types::project::ProjectSpec;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_name_and_targets() {
        let doc = render(
            &ProjectSpec::new("Lib")
                .with_target("net8.0")
                .with_target("net48"),
        );
        let text = doc.to_string();
        assert!(text.contains(r#"name = "Lib""#));
        assert!(text.contains(r#"targets = ["net8.0", "net48"]"#));
        assert!(!text.contains("[dependencies]"));
    }

    #[test]
    fn references_become_sibling_path_deps() {
        let doc = render(&ProjectSpec::new("App").with_reference("Lib"));
        assert_eq!(
            doc["dependencies"]["Lib"]["path"].as_str(),
            Some("../Lib")
        );
    }

    #[test]
    fn patch_can_extend_the_rendered_tree() {
        let mut doc = render(&ProjectSpec::new("App"));
        doc["dependencies"]["Extra.Package"] = toml_edit::value("1.2.3");
        let text = doc.to_string();
        assert!(text.contains(r#""Extra.Package" = "1.2.3""#));
    }
}
