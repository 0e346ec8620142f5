use crate::dependency_analysis::domain::{
    DeclaredDependency, DependencyDeclaration, DependencyNode, GradleConfiguration,
    GradleProject, MavenProject, Repository, ResolvedCoordinate,
};
use crate::ports::outbound::{PackageMetadataFetcher, ReportRow, ReportSink};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct CollectingSink {
    rows: Mutex<Vec<ReportRow>>,
}

impl CollectingSink {
    pub fn rows(&self) -> Vec<ReportRow> {
        self.rows.lock().unwrap().clone()
    }
}

impl ReportSink for CollectingSink {
    fn insert_row(&self, row: ReportRow) {
        self.rows.lock().unwrap().push(row);
    }
}

pub(crate) fn gav(coordinate: &str) -> ResolvedCoordinate {
    coordinate.parse().unwrap()
}

pub(crate) fn node(coordinate: &str, children: Vec<DependencyNode>) -> DependencyNode {
    let mut node = DependencyNode::new(gav(coordinate), 0).with_children(children);
    node.renumber(0);
    node
}

pub(crate) fn declared(coordinate: &str) -> DeclaredDependency {
    let gav = gav(coordinate);
    DeclaredDependency::new(gav.group, gav.artifact).with_version(gav.version)
}

pub(crate) fn maven_project(
    path: &str,
    artifact: &str,
    dependencies: Vec<DeclaredDependency>,
    resolved: Vec<(&str, Vec<DependencyNode>)>,
) -> MavenProject {
    MavenProject {
        path: PathBuf::from(path),
        group_id: "com.example".to_string(),
        artifact_id: artifact.to_string(),
        version: "1.0.0".to_string(),
        repositories: vec![],
        dependencies,
        resolved: resolved
            .into_iter()
            .map(|(scope, nodes)| (scope.to_string(), nodes))
            .collect(),
        markers: vec![],
    }
}

pub(crate) fn gradle_project(
    path: &str,
    name: &str,
    dependencies: Vec<DeclaredDependency>,
    configurations: Vec<(&str, Vec<DependencyNode>)>,
) -> GradleProject {
    GradleProject {
        path: PathBuf::from(path),
        group: "com.example".to_string(),
        name: name.to_string(),
        version: "1.0.0".to_string(),
        repositories: vec![],
        dependencies,
        configurations: configurations
            .into_iter()
            .map(|(name, resolved)| {
                (
                    name.to_string(),
                    GradleConfiguration {
                        resolved,
                        ..Default::default()
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
        markers: vec![],
    }
}

/// Metadata fetcher backed by an in-memory `coordinate -> dependencies` graph.
/// Unknown coordinates fail to fetch.
#[derive(Default)]
pub(crate) struct GraphFetcher {
    graph: HashMap<ResolvedCoordinate, Vec<ResolvedCoordinate>>,
}

impl GraphFetcher {
    pub fn edge(mut self, from: &str, to: &[&str]) -> Self {
        self.graph
            .insert(gav(from), to.iter().map(|c| gav(c)).collect());
        self
    }
}

#[async_trait]
impl PackageMetadataFetcher for GraphFetcher {
    async fn fetch_dependencies(
        &self,
        coordinate: &ResolvedCoordinate,
        _repositories: &[Repository],
    ) -> Result<Vec<DependencyDeclaration>> {
        match self.graph.get(coordinate) {
            Some(children) => Ok(children
                .iter()
                .cloned()
                .map(DependencyDeclaration::new)
                .collect()),
            None => anyhow::bail!("no metadata for {}", coordinate),
        }
    }
}
