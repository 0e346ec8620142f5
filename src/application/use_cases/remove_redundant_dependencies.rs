use crate::application::services::ClosureResolver;
use crate::dependency_analysis::domain::{
    ClosureUnion, GradleProject, MavenProject, Project, ProjectAccumulator, Repository,
    ResolvedCoordinate, Scope,
};
use crate::dependency_analysis::services::{CoordinateMatcher, RedundancyDetector};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{PackageMetadataFetcher, ReportRow, ReportSink};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::debug;

/// Bucket shared by every configuration of a Gradle project
const GRADLE_BUCKET: &str = "all";

/// RemoveRedundantDependenciesUseCase - removes direct dependencies that a
/// "parent" dependency already brings in transitively
///
/// Scan resolves the closure of every direct dependency matching the parent
/// patterns and unions it per project and scope. Rewrite removes each other
/// direct dependency whose exact version is found in a covering closure.
///
/// # Type Parameters
/// * `F` - PackageMetadataFetcher implementation used by the closure resolver
pub struct RemoveRedundantDependenciesUseCase<F> {
    resolver: ClosureResolver<F>,
    group_pattern: String,
    artifact_pattern: String,
    scope: Option<String>,
    configuration: Option<String>,
}

impl<F: PackageMetadataFetcher> RemoveRedundantDependenciesUseCase<F> {
    pub fn new(
        resolver: ClosureResolver<F>,
        group_pattern: impl Into<String>,
        artifact_pattern: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
            scope: None,
            configuration: None,
        }
    }

    /// Limits Maven removals to one scope.
    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    /// Limits Gradle removals to declarations in one configuration.
    pub fn with_configuration(mut self, configuration: Option<String>) -> Self {
        self.configuration = configuration;
        self
    }

    fn parent(&self) -> Result<CoordinateMatcher> {
        CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)
    }

    fn selected_scope(&self) -> Result<Option<Scope>> {
        self.scope.as_deref().map(Scope::parse_selectable).transpose()
    }

    fn selected_configuration(&self) -> Option<Scope> {
        self.configuration.as_deref().map(Scope::parse)
    }

    /// Unions the closures of the project's parent dependencies into
    /// `(project, bucket)` for every `(bucket, roots)` pair.
    async fn collect_closures(
        &self,
        key: &str,
        repositories: &[Repository],
        buckets: Vec<(String, Vec<ResolvedCoordinate>)>,
    ) -> ProjectAccumulator<ClosureUnion> {
        let mut accumulator = ProjectAccumulator::new();
        for (bucket, roots) in buckets {
            let resolved = self.resolver.resolve_all(&roots, repositories).await;
            for (root, closure, ok) in resolved {
                if !ok {
                    debug!("Closure of {} in {} is unknown, keeping its dependents", root, key);
                }
                accumulator.merge_into(key, &bucket, closure.into_set());
            }
        }
        accumulator
    }

    fn redundant_row(project: &str, scope: &str, coordinate: &ResolvedCoordinate) -> ReportRow {
        ReportRow::RedundantDependency {
            project: project.to_string(),
            scope: scope.to_string(),
            group: coordinate.group.clone(),
            artifact: coordinate.artifact.clone(),
            version: coordinate.version.clone(),
        }
    }
}

#[async_trait]
impl<F: PackageMetadataFetcher> ScanningAnalysis for RemoveRedundantDependenciesUseCase<F> {
    type Accumulator = ProjectAccumulator<ClosureUnion>;

    fn name(&self) -> &'static str {
        "redundant"
    }

    fn validate(&self) -> Result<()> {
        self.parent()?;
        self.selected_scope()?;
        Ok(())
    }

    fn initial_value(&self) -> Self::Accumulator {
        ProjectAccumulator::new()
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        let parent = self.parent()?;
        let buckets = project
            .resolved
            .iter()
            .map(|(scope, nodes)| {
                let roots = nodes
                    .iter()
                    .filter(|node| node.direct && parent.matches_resolved(&node.coordinate))
                    .map(|node| node.coordinate.clone())
                    .collect::<Vec<_>>();
                (Scope::parse(scope).bucket(), roots)
            })
            .filter(|(_, roots)| !roots.is_empty())
            .collect();
        Ok(self
            .collect_closures(&project.project_key(), &project.repositories, buckets)
            .await)
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        let parent = self.parent()?;
        let roots: BTreeSet<ResolvedCoordinate> = project
            .configurations
            .values()
            .flat_map(|configuration| configuration.resolved.iter())
            .filter(|node| node.direct && parent.matches_resolved(&node.coordinate))
            .map(|node| node.coordinate.clone())
            .collect();
        if roots.is_empty() {
            return Ok(self.initial_value());
        }
        let buckets = vec![(GRADLE_BUCKET.to_string(), roots.into_iter().collect())];
        Ok(self
            .collect_closures(&project.project_key(), &project.repositories, buckets)
            .await)
    }

    fn rewrite_maven(
        &self,
        project: &mut MavenProject,
        accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        let (Ok(parent), Ok(selected)) = (self.parent(), self.selected_scope()) else {
            return;
        };
        let key = project.project_key();
        let Some(closures) = accumulator.buckets(&key) else {
            return;
        };

        let mut redundant = Vec::new();
        for (name, nodes) in &project.resolved {
            let scope = Scope::parse(name);
            if selected.as_ref().is_some_and(|s| s != &scope) {
                continue;
            }
            for node in nodes.iter().filter(|n| n.direct) {
                if parent.matches_resolved(&node.coordinate) {
                    continue;
                }
                if RedundancyDetector::is_redundant(&node.coordinate, &scope, closures) {
                    redundant.push((scope.clone(), node.coordinate.clone()));
                }
            }
        }

        for (scope, coordinate) in redundant {
            if project.remove_declared(&coordinate.coordinate(), Some(&scope)) > 0 {
                sink.insert_row(Self::redundant_row(&key, scope.name(), &coordinate));
            }
        }
    }

    fn rewrite_gradle(
        &self,
        project: &mut GradleProject,
        accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        let Ok(parent) = self.parent() else {
            return;
        };
        let key = project.project_key();
        let Some(closures) = accumulator.buckets(&key) else {
            return;
        };
        let bucket_scope = Scope::parse(GRADLE_BUCKET);

        let redundant: BTreeSet<ResolvedCoordinate> = project
            .configurations
            .values()
            .flat_map(|configuration| configuration.resolved.iter())
            .filter(|node| node.direct && !parent.matches_resolved(&node.coordinate))
            .filter(|node| RedundancyDetector::is_redundant(&node.coordinate, &bucket_scope, closures))
            .map(|node| node.coordinate.clone())
            .collect();

        let configuration = self.selected_configuration();
        for coordinate in redundant {
            if project.remove_declared(&coordinate.coordinate(), configuration.as_ref()) > 0 {
                let scope = configuration
                    .as_ref()
                    .map_or(GRADLE_BUCKET, |c| c.name());
                sink.insert_row(Self::redundant_row(&key, scope, &coordinate));
            }
        }
    }
}
