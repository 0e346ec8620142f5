use crate::application::dto::ListScope;
use crate::dependency_analysis::domain::{
    walk, DependencyNode, GradleProject, MavenProject, Project, ResolvedCoordinate,
};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Document paths per Gradle project identity.
pub type GradleProjectPaths = BTreeMap<String, BTreeSet<PathBuf>>;

/// DependencyListUseCase - lists the dependencies of every project
///
/// A Gradle project can be described by more than one document (for example a
/// build script and a settings file); it is listed only from the first one.
pub struct DependencyListUseCase {
    scope: ListScope,
    include_transitive: bool,
}

impl DependencyListUseCase {
    pub fn new(scope: ListScope, include_transitive: bool) -> Self {
        Self {
            scope,
            include_transitive,
        }
    }

    /// Direct dependencies first, then transitive ones, each coordinate once.
    fn entries<'a>(&self, nodes: &'a [DependencyNode]) -> Vec<&'a ResolvedCoordinate> {
        let mut seen = BTreeSet::new();
        let direct = nodes.iter();
        let transitive = walk(nodes).filter(|node| self.include_transitive && !node.direct);
        direct
            .chain(transitive)
            .map(|node| &node.coordinate)
            .filter(|coordinate| seen.insert(*coordinate))
            .collect()
    }

    fn emit(&self, project: &dyn Project, nodes: &[DependencyNode], sink: &dyn ReportSink) {
        let identity = project.identity();
        let build_tool = project.build_tool().to_string();
        let direct: BTreeSet<&ResolvedCoordinate> = nodes.iter().map(|n| &n.coordinate).collect();
        for dependency in self.entries(nodes) {
            sink.insert_row(ReportRow::DependencyListEntry {
                build_tool: build_tool.clone(),
                group: identity.group.clone(),
                artifact: identity.artifact.clone(),
                version: identity.version.clone(),
                dependency_group: dependency.group.clone(),
                dependency_artifact: dependency.artifact.clone(),
                dependency_version: dependency.version.clone(),
                direct: direct.contains(dependency),
            });
        }
    }
}

#[async_trait]
impl ScanningAnalysis for DependencyListUseCase {
    type Accumulator = GradleProjectPaths;

    fn name(&self) -> &'static str {
        "list"
    }

    fn initial_value(&self) -> Self::Accumulator {
        BTreeMap::new()
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        Ok(BTreeMap::from([(
            project.identity().to_string(),
            BTreeSet::from([project.path.clone()]),
        )]))
    }

    fn rewrite_maven(
        &self,
        project: &mut MavenProject,
        _accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        if let Some(nodes) = project.resolved.get(self.scope.maven_scope()) {
            self.emit(&*project, nodes, sink);
        }
    }

    fn rewrite_gradle(
        &self,
        project: &mut GradleProject,
        accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        let first_path = accumulator
            .get(&project.identity().to_string())
            .and_then(|paths| paths.first());
        if first_path != Some(&project.path) {
            return;
        }
        if let Some(configuration) = project.configurations.get(self.scope.gradle_configuration()) {
            self.emit(&*project, &configuration.resolved, sink);
        }
    }
}
