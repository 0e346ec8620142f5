use super::occurrences::find_occurrences;
use crate::dependency_analysis::domain::{GradleProject, MavenProject, Project};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::ReportSink;
use crate::shared::Result;
use async_trait::async_trait;

/// DependencyInsightUseCase - shows where a dependency is used
///
/// Needs no workspace-wide state, so scan is a no-op.
pub struct DependencyInsightUseCase {
    group_pattern: String,
    artifact_pattern: String,
}

impl DependencyInsightUseCase {
    pub fn new(group_pattern: impl Into<String>, artifact_pattern: impl Into<String>) -> Self {
        Self {
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
        }
    }

    fn rewrite_project(&self, project: &mut dyn Project, sink: &dyn ReportSink) {
        let Ok(matcher) = CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)
        else {
            return;
        };
        let key = project.project_key();
        for occurrence in find_occurrences(project, |node| matcher.matches_resolved(&node.coordinate)) {
            project.add_marker(&format!("Found dependency: {}", occurrence.coordinate));
            sink.insert_row(occurrence.in_use_row(&key));
        }
    }
}

#[async_trait]
impl ScanningAnalysis for DependencyInsightUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "insight"
    }

    fn validate(&self) -> Result<()> {
        CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern).map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }
}
