use crate::dependency_analysis::domain::{walk, DependencyNode, Project, ResolvedCoordinate};
use crate::ports::outbound::ReportRow;

/// One resolved node of a project, detached from the project borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub scope: String,
    pub coordinate: ResolvedCoordinate,
    pub depth: u32,
}

impl Occurrence {
    pub fn in_use_row(&self, project: &str) -> ReportRow {
        ReportRow::DependencyInUse {
            project: project.to_string(),
            scope: self.scope.clone(),
            group: self.coordinate.group.clone(),
            artifact: self.coordinate.artifact.clone(),
            version: self.coordinate.version.clone(),
            depth: self.depth,
        }
    }
}

/// Every resolved node of every scope that satisfies `predicate`, in scope
/// order and pre-order within a scope.
pub(crate) fn find_occurrences(
    project: &dyn Project,
    predicate: impl Fn(&DependencyNode) -> bool,
) -> Vec<Occurrence> {
    project
        .resolved_scopes()
        .into_iter()
        .flat_map(|(scope, nodes)| {
            walk(nodes)
                .filter(|node| predicate(node))
                .map(move |node| Occurrence {
                    scope: scope.to_string(),
                    coordinate: node.coordinate.clone(),
                    depth: node.depth,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
