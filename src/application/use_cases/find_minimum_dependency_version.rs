use super::occurrences::find_occurrences;
use crate::dependency_analysis::domain::{
    walk, GradleProject, MavenProject, MinimumVersions, Project, VersionComparator,
};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::ReportSink;
use crate::shared::Result;
use async_trait::async_trait;

/// FindMinimumDependencyVersionUseCase - finds the lowest version of a
/// dependency in use anywhere in the workspace
///
/// Every project contributes its lowest version per matching coordinate;
/// rewrite marks each occurrence of the overall minimum version, across
/// every coordinate tied at it.
pub struct FindMinimumDependencyVersionUseCase {
    comparator: VersionComparator,
    group_pattern: String,
    artifact_pattern: String,
}

impl FindMinimumDependencyVersionUseCase {
    pub fn new(
        comparator: VersionComparator,
        group_pattern: impl Into<String>,
        artifact_pattern: impl Into<String>,
    ) -> Self {
        Self {
            comparator,
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
        }
    }

    fn matcher(&self) -> Result<CoordinateMatcher> {
        CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)
    }

    fn scan_project(&self, project: &dyn Project) -> Result<MinimumVersions> {
        let matcher = self.matcher()?;
        let mut minimums = self.initial_value();
        for (_, nodes) in project.resolved_scopes() {
            walk(nodes)
                .filter(|node| matcher.matches_resolved(&node.coordinate))
                .for_each(|node| minimums.offer(&node.coordinate));
        }
        Ok(minimums)
    }

    fn rewrite_project(
        &self,
        project: &mut dyn Project,
        accumulator: &MinimumVersions,
        sink: &dyn ReportSink,
    ) {
        let minimums = accumulator.at_overall_minimum();
        if minimums.is_empty() {
            return;
        }
        let key = project.project_key();
        for occurrence in find_occurrences(project, |node| minimums.contains(&&node.coordinate)) {
            project.add_marker(&format!("Minimum version in use: {}", occurrence.coordinate));
            sink.insert_row(occurrence.in_use_row(&key));
        }
    }
}

#[async_trait]
impl ScanningAnalysis for FindMinimumDependencyVersionUseCase {
    type Accumulator = MinimumVersions;

    fn name(&self) -> &'static str {
        "min-version"
    }

    fn validate(&self) -> Result<()> {
        self.matcher().map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {
        MinimumVersions::new(self.comparator.clone())
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        self.scan_project(project)
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        self.scan_project(project)
    }

    fn rewrite_maven(
        &self,
        project: &mut MavenProject,
        accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        self.rewrite_project(project, accumulator, sink);
    }

    fn rewrite_gradle(
        &self,
        project: &mut GradleProject,
        accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        self.rewrite_project(project, accumulator, sink);
    }
}
