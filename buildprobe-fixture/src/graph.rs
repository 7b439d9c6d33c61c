//! Validation and ordering of the project reference graph.
//!
//! All checks here run before anything touches the filesystem: a spec that
//! fails validation must leave no partial directory tree behind.

use crate::error::{FixtureError, FixtureResult};
use buildprobe_types::project::FixtureSpec;
use std::collections::BTreeMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Returns project indices in materialization order: every referenced
/// project comes before the projects referencing it.
///
/// Fails with `Precondition` on duplicate names, references to unknown
/// projects, or reference cycles. Cycles are detected with an in-progress
/// marker during the depth-first walk.
pub(crate) fn materialization_order(spec: &FixtureSpec) -> FixtureResult<Vec<usize>> {
    let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, project) in spec.projects.iter().enumerate() {
        if by_name.insert(project.name.as_str(), idx).is_some() {
            return Err(FixtureError::precondition(format!(
                "duplicate project name: {}",
                project.name
            )));
        }
    }

    let mut marks = vec![Mark::Unvisited; spec.projects.len()];
    let mut order = Vec::with_capacity(spec.projects.len());

    for idx in 0..spec.projects.len() {
        visit(spec, &by_name, idx, &mut marks, &mut order)?;
    }

    Ok(order)
}

fn visit(
    spec: &FixtureSpec,
    by_name: &BTreeMap<&str, usize>,
    idx: usize,
    marks: &mut [Mark],
    order: &mut Vec<usize>,
) -> FixtureResult<()> {
    match marks[idx] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            return Err(FixtureError::precondition(format!(
                "reference cycle through project: {}",
                spec.projects[idx].name
            )));
        }
        Mark::Unvisited => {}
    }

    marks[idx] = Mark::InProgress;

    for reference in &spec.projects[idx].references {
        let Some(&ref_idx) = by_name.get(reference.as_str()) else {
            return Err(FixtureError::precondition(format!(
                "project {} references unknown project: {}",
                spec.projects[idx].name, reference
            )));
        };
        visit(spec, by_name, ref_idx, marks, order)?;
    }

    marks[idx] = Mark::Done;
    order.push(idx);
    Ok(())
}
