use crate::dependency_analysis::domain::{
    BuildDocument, GradleProject, MavenProject, Merge, Repository, ResolvedCoordinate,
};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{CheckFailure, ReportRow, ReportSink, RepositoryChecker};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Artifact downloaded to check that a repository actually serves content
pub const DEFAULT_CHECK_COORDINATE: &str = "com.fasterxml.jackson.core:jackson-core:2.16.0";

/// Number of repositories checked concurrently
const CHECK_CONCURRENCY: usize = 4;

/// Repositories seen during scan, split by build tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryInventory {
    pub maven: BTreeSet<Repository>,
    pub gradle: BTreeSet<Repository>,
    pub saw_maven: bool,
    pub saw_gradle: bool,
}

impl RepositoryInventory {
    /// Distinct repositories to check, keyed by URI without trailing slash.
    /// Maven builds always fall back to Maven Central, so it is checked whenever
    /// a Maven project was seen.
    pub fn check_targets(&self) -> Vec<Repository> {
        let mut targets: BTreeMap<String, Repository> = BTreeMap::new();
        let central = self.saw_maven.then(Repository::maven_central);
        for repository in self.maven.iter().chain(&self.gradle).chain(central.iter()) {
            targets
                .entry(repository.normalized_uri().to_string())
                .or_insert_with(|| repository.clone());
        }
        targets.into_values().collect()
    }
}

impl Merge for RepositoryInventory {
    fn merge(&mut self, other: Self) {
        self.maven.extend(other.maven);
        self.gradle.extend(other.gradle);
        self.saw_maven |= other.saw_maven;
        self.saw_gradle |= other.saw_gradle;
    }
}

/// DependencyResolutionDiagnosticUseCase - checks that every repository the
/// workspace depends on is reachable and serves artifacts, and reports Gradle
/// configurations that failed to resolve
///
/// # Type Parameters
/// * `P` - RepositoryChecker implementation
pub struct DependencyResolutionDiagnosticUseCase<P> {
    checker: P,
    check_coordinate: String,
}

impl<P: RepositoryChecker> DependencyResolutionDiagnosticUseCase<P> {
    pub fn new(checker: P) -> Self {
        Self {
            checker,
            check_coordinate: DEFAULT_CHECK_COORDINATE.to_string(),
        }
    }

    pub fn with_check_coordinate(mut self, coordinate: impl Into<String>) -> Self {
        self.check_coordinate = coordinate.into();
        self
    }

    fn check_artifact(&self) -> Result<ResolvedCoordinate> {
        self.check_coordinate.parse()
    }

    async fn check_repository(&self, repository: &Repository, artifact: &ResolvedCoordinate) -> ReportRow {
        let ping = self.checker.ping(repository).await;
        let download = match &ping {
            Ok(()) => self.checker.try_download(artifact, repository).await,
            Err(_) => Ok(()),
        };
        if let Err(failure) = ping.as_ref().and(download.as_ref()) {
            debug!("Check of {} failed: {}", repository.uri, failure);
        }
        accessibility_row(repository, ping.err(), download.err())
    }
}

fn accessibility_row(
    repository: &Repository,
    ping: Option<CheckFailure>,
    download: Option<CheckFailure>,
) -> ReportRow {
    ReportRow::RepositoryAccessibility {
        uri: repository.normalized_uri().to_string(),
        ping_error_type: ping.as_ref().map(|f| f.error_type.clone()),
        ping_error_message: ping.as_ref().map(|f| f.message.clone()),
        ping_http_code: ping.as_ref().and_then(|f| f.http_code),
        resolve_error_type: download.as_ref().map(|f| f.error_type.clone()),
        resolve_error_message: download.map(|f| f.message),
    }
}

#[async_trait]
impl<P: RepositoryChecker> ScanningAnalysis for DependencyResolutionDiagnosticUseCase<P> {
    type Accumulator = RepositoryInventory;

    fn name(&self) -> &'static str {
        "diagnose"
    }

    fn validate(&self) -> Result<()> {
        self.check_artifact().map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {
        RepositoryInventory::default()
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        Ok(RepositoryInventory {
            maven: project.repositories.iter().cloned().collect(),
            saw_maven: true,
            ..Default::default()
        })
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        Ok(RepositoryInventory {
            gradle: project.repositories.iter().cloned().collect(),
            saw_gradle: true,
            ..Default::default()
        })
    }

    async fn generate(
        &self,
        accumulator: &Self::Accumulator,
        _documents: &[BuildDocument],
        sink: &dyn ReportSink,
    ) -> Vec<BuildDocument> {
        let Ok(artifact) = self.check_artifact() else {
            return Vec::new();
        };
        let targets = accumulator.check_targets();
        let artifact = &artifact;
        let rows: Vec<ReportRow> = stream::iter(targets)
            .map(|repository| async move { self.check_repository(&repository, artifact).await })
            .buffered(CHECK_CONCURRENCY)
            .collect()
            .await;
        for row in rows {
            sink.insert_row(row);
        }
        Vec::new()
    }

    fn rewrite_gradle(
        &self,
        project: &mut GradleProject,
        _accumulator: &Self::Accumulator,
        sink: &dyn ReportSink,
    ) {
        for (name, configuration) in &project.configurations {
            let Some(exception_type) = &configuration.exception_type else {
                continue;
            };
            sink.insert_row(ReportRow::GradleConfigurationError {
                project_path: project.path.display().to_string(),
                configuration: name.clone(),
                exception_type: exception_type.clone(),
                message: configuration.message.clone(),
            });
        }
    }
}
