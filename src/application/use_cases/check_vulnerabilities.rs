use crate::dependency_analysis::domain::{
    walk, GradleProject, MavenProject, Project, ResolvedCoordinate,
};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink, VulnerabilityMatch, VulnerabilityScanner};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

/// Known vulnerabilities per affected coordinate.
pub type VulnerabilityIndex = BTreeMap<ResolvedCoordinate, BTreeSet<VulnerabilityMatch>>;

/// CheckVulnerabilitiesUseCase - finds known vulnerabilities in resolved dependencies
///
/// The scanner is consulted once per project during scan. Rewrite marks each
/// direct dependency that brings in a vulnerable coordinate.
///
/// # Type Parameters
/// * `V` - VulnerabilityScanner implementation
pub struct CheckVulnerabilitiesUseCase<V> {
    scanner: V,
}

impl<V: VulnerabilityScanner> CheckVulnerabilitiesUseCase<V> {
    pub fn new(scanner: V) -> Self {
        Self { scanner }
    }

    async fn scan_coordinates(&self, coordinates: Vec<ResolvedCoordinate>) -> Result<VulnerabilityIndex> {
        if coordinates.is_empty() {
            return Ok(VulnerabilityIndex::new());
        }
        let matches = self.scanner.scan(&coordinates).await?;
        Ok(matches
            .into_iter()
            .filter(|(_, found)| !found.is_empty())
            .map(|(coordinate, found)| (coordinate, found.into_iter().collect()))
            .collect())
    }

    fn rewrite_project(
        &self,
        project: &mut dyn Project,
        index: &VulnerabilityIndex,
        sink: &dyn ReportSink,
    ) {
        let mut markers = Vec::new();
        let mut rows = BTreeSet::new();
        for (_, nodes) in project.resolved_scopes() {
            for direct in nodes {
                let mut vulnerable_below = false;
                for node in direct.iter() {
                    let Some(found) = index.get(&node.coordinate) else {
                        continue;
                    };
                    vulnerable_below = true;
                    for vulnerability in found {
                        rows.insert(vulnerability_row(&node.coordinate, vulnerability, node.depth));
                    }
                }
                if vulnerable_below {
                    markers.push(format!("Vulnerable dependencies via {}", direct.coordinate));
                }
            }
        }
        for marker in markers {
            project.add_marker(&marker);
        }
        for row in rows {
            sink.insert_row(row);
        }
    }
}

/// Every distinct coordinate resolved in any scope of `project`.
fn resolved_coordinates(project: &dyn Project) -> Vec<ResolvedCoordinate> {
    project
        .resolved_scopes()
        .into_iter()
        .flat_map(|(_, nodes)| walk(nodes).map(|node| node.coordinate.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn vulnerability_row(
    coordinate: &ResolvedCoordinate,
    vulnerability: &VulnerabilityMatch,
    depth: u32,
) -> ReportRow {
    ReportRow::Vulnerability {
        group: coordinate.group.clone(),
        artifact: coordinate.artifact.clone(),
        version: coordinate.version.clone(),
        id: vulnerability.id.clone(),
        summary: vulnerability.summary.clone(),
        severity: vulnerability.severity.clone(),
        depth,
    }
}

#[async_trait]
impl<V: VulnerabilityScanner> ScanningAnalysis for CheckVulnerabilitiesUseCase<V> {
    type Accumulator = VulnerabilityIndex;

    fn name(&self) -> &'static str {
        "vulns"
    }

    fn initial_value(&self) -> Self::Accumulator {
        VulnerabilityIndex::new()
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        let coordinates = resolved_coordinates(project);
        self.scan_coordinates(coordinates).await
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        let coordinates = resolved_coordinates(project);
        self.scan_coordinates(coordinates).await
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
