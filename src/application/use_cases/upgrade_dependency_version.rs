use crate::dependency_analysis::domain::{GradleProject, MavenProject, Project, VersionComparator};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use crate::shared::Result;
use anyhow::bail;
use async_trait::async_trait;

/// UpgradeDependencyVersionUseCase - raises explicitly declared versions
///
/// Only declarations with their own version are touched; managed versions are
/// left to whatever manages them. A declaration is never downgraded.
pub struct UpgradeDependencyVersionUseCase {
    comparator: VersionComparator,
    group_pattern: String,
    artifact_pattern: String,
    new_version: String,
}

impl UpgradeDependencyVersionUseCase {
    pub fn new(
        comparator: VersionComparator,
        group_pattern: impl Into<String>,
        artifact_pattern: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        Self {
            comparator,
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
            new_version: new_version.into(),
        }
    }

    fn rewrite_project(&self, project: &mut dyn Project, sink: &dyn ReportSink) {
        let Ok(matcher) = CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)
        else {
            return;
        };
        let key = project.project_key();
        for dependency in project.declared_mut() {
            if !matcher.matches(&dependency.group, &dependency.artifact) {
                continue;
            }
            let Some(current) = dependency.version.as_deref() else {
                continue;
            };
            if !self.comparator.is_newer(&self.new_version, current) {
                continue;
            }
            sink.insert_row(ReportRow::VersionUpgrade {
                project: key.clone(),
                group: dependency.group.clone(),
                artifact: dependency.artifact.clone(),
                from: current.to_string(),
                to: self.new_version.clone(),
            });
            dependency.version = Some(self.new_version.clone());
        }
    }
}

#[async_trait]
impl ScanningAnalysis for UpgradeDependencyVersionUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "upgrade"
    }

    fn validate(&self) -> Result<()> {
        CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)?;
        if self.new_version.trim().is_empty() {
            bail!("New version must not be empty");
        }
        Ok(())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }
}
