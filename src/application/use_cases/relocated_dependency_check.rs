use super::occurrences::find_occurrences;
use crate::dependency_analysis::domain::{Coordinate, GradleProject, MavenProject, Project};
use crate::dependency_analysis::policies::RelocationTable;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// RelocatedDependencyCheckUseCase - flags dependencies whose coordinates moved
pub struct RelocatedDependencyCheckUseCase {
    table: RelocationTable,
}

impl RelocatedDependencyCheckUseCase {
    pub fn new(table: RelocationTable) -> Self {
        Self { table }
    }

    fn rewrite_project(&self, project: &mut dyn Project, sink: &dyn ReportSink) {
        let occurrences = find_occurrences(project, |node| {
            self.table.lookup(&node.coordinate.coordinate()).is_some()
        });

        let mut reported = BTreeSet::new();
        for occurrence in occurrences {
            let coordinate = occurrence.coordinate.coordinate();
            let Some(relocation) = self.table.lookup(&coordinate) else {
                continue;
            };
            let target = relocation.target(&coordinate.artifact);
            project.add_marker(&format!("{} has been relocated to {}", coordinate, target));
            if reported.insert(coordinate.clone()) {
                sink.insert_row(relocated_row(&coordinate, &target, relocation.context.clone()));
            }
        }
    }
}

fn relocated_row(from: &Coordinate, to: &Coordinate, context: Option<String>) -> ReportRow {
    ReportRow::RelocatedDependency {
        group: from.group.clone(),
        artifact: from.artifact.clone(),
        relocated_group: to.group.clone(),
        relocated_artifact: to.artifact.clone(),
        context,
    }
}

#[async_trait]
impl ScanningAnalysis for RelocatedDependencyCheckUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "relocated"
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }
}
