use super::coordinate::{Coordinate, Repository, ResolvedCoordinate};
use super::dependency_node::DependencyNode;
use super::scope::Scope;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTool::Maven => write!(f, "Maven"),
            BuildTool::Gradle => write!(f, "Gradle"),
        }
    }
}

/// A dependency as written in the build file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
    pub group: String,
    pub artifact: String,
    /// Absent when the version is managed elsewhere (BOM, parent, platform).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Maven scope or Gradle configuration. Absent means `compile` for Maven.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl DeclaredDependency {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: None,
            scope: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.group.clone(), self.artifact.clone())
    }

    fn is(&self, coordinate: &Coordinate) -> bool {
        self.group == coordinate.group && self.artifact == coordinate.artifact
    }
}

/// Read and rewrite access shared by both project kinds.
pub trait Project {
    fn path(&self) -> &Path;
    fn build_tool(&self) -> BuildTool;
    /// `group:artifact:version` of the project itself.
    fn identity(&self) -> ResolvedCoordinate;
    fn repositories(&self) -> &[Repository];
    fn declared(&self) -> &[DeclaredDependency];
    fn declared_mut(&mut self) -> &mut Vec<DeclaredDependency>;
    /// Resolved dependency trees keyed by scope or configuration name.
    fn resolved_scopes(&self) -> Vec<(&str, &[DependencyNode])>;
    fn markers(&self) -> &[String];
    fn markers_mut(&mut self) -> &mut Vec<String>;

    /// Whether a declaration belongs to `scope`.
    fn declared_in(&self, dependency: &DeclaredDependency, scope: &Scope) -> bool;

    /// Project identity used as the accumulator key.
    fn project_key(&self) -> String {
        self.identity().coordinate().to_string()
    }

    /// Attaches a search marker. Returns false if the same marker is already present.
    fn add_marker(&mut self, message: &str) -> bool {
        if self.markers().iter().any(|m| m == message) {
            return false;
        }
        self.markers_mut().push(message.to_string());
        true
    }

    /// Removes declarations of `coordinate`, limited to `scope` when given.
    /// Returns the number of declarations removed.
    fn remove_declared(&mut self, coordinate: &Coordinate, scope: Option<&Scope>) -> usize {
        let declared = std::mem::take(self.declared_mut());
        let (removed, kept): (Vec<_>, Vec<_>) = declared.into_iter().partition(|dep| {
            dep.is(coordinate) && scope.map_or(true, |s| self.declared_in(dep, s))
        });
        *self.declared_mut() = kept;
        removed.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenProject {
    pub path: PathBuf,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
    #[serde(default)]
    pub resolved: BTreeMap<String, Vec<DependencyNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

impl Project for MavenProject {
    fn path(&self) -> &Path {
        &self.path
    }

    fn build_tool(&self) -> BuildTool {
        BuildTool::Maven
    }

    fn identity(&self) -> ResolvedCoordinate {
        ResolvedCoordinate::new(&self.group_id, &self.artifact_id, &self.version)
    }

    fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    fn declared(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }

    fn declared_mut(&mut self) -> &mut Vec<DeclaredDependency> {
        &mut self.dependencies
    }

    fn resolved_scopes(&self) -> Vec<(&str, &[DependencyNode])> {
        self.resolved
            .iter()
            .map(|(scope, nodes)| (scope.as_str(), nodes.as_slice()))
            .collect()
    }

    fn markers(&self) -> &[String] {
        &self.markers
    }

    fn markers_mut(&mut self) -> &mut Vec<String> {
        &mut self.markers
    }

    fn declared_in(&self, dependency: &DeclaredDependency, scope: &Scope) -> bool {
        dependency.scope.as_ref().unwrap_or(&Scope::Compile) == scope
    }
}

/// One Gradle configuration as resolved by the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradleConfiguration {
    #[serde(default)]
    pub resolved: Vec<DependencyNode>,
    /// Set when the configuration failed to resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradleProject {
    pub path: PathBuf,
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
    #[serde(default)]
    pub configurations: BTreeMap<String, GradleConfiguration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

impl Project for GradleProject {
    fn path(&self) -> &Path {
        &self.path
    }

    fn build_tool(&self) -> BuildTool {
        BuildTool::Gradle
    }

    fn identity(&self) -> ResolvedCoordinate {
        ResolvedCoordinate::new(&self.group, &self.name, &self.version)
    }

    fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    fn declared(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }

    fn declared_mut(&mut self) -> &mut Vec<DeclaredDependency> {
        &mut self.dependencies
    }

    fn resolved_scopes(&self) -> Vec<(&str, &[DependencyNode])> {
        self.configurations
            .iter()
            .map(|(name, conf)| (name.as_str(), conf.resolved.as_slice()))
            .collect()
    }

    fn markers(&self) -> &[String] {
        &self.markers
    }

    fn markers_mut(&mut self) -> &mut Vec<String> {
        &mut self.markers
    }

    fn declared_in(&self, dependency: &DeclaredDependency, scope: &Scope) -> bool {
        dependency.scope.as_ref() == Some(scope)
    }
}

/// Any other file in the workspace, e.g. a previously generated `sbom.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainDocument {
    pub path: PathBuf,
    #[serde(default)]
    pub content: String,
}

impl PlainDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A parsed workspace document, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BuildDocument {
    Maven(MavenProject),
    Gradle(GradleProject),
    Plain(PlainDocument),
}

impl BuildDocument {
    pub fn path(&self) -> &Path {
        match self {
            BuildDocument::Maven(project) => &project.path,
            BuildDocument::Gradle(project) => &project.path,
            BuildDocument::Plain(doc) => &doc.path,
        }
    }

    pub fn project(&self) -> Option<&dyn Project> {
        match self {
            BuildDocument::Maven(project) => Some(project),
            BuildDocument::Gradle(project) => Some(project),
            BuildDocument::Plain(_) => None,
        }
    }

    /// Recomputes depth and direct flags of every resolved tree.
    pub fn normalize(&mut self) {
        let forests: Vec<&mut Vec<DependencyNode>> = match self {
            BuildDocument::Maven(project) => project.resolved.values_mut().collect(),
            BuildDocument::Gradle(project) => project
                .configurations
                .values_mut()
                .map(|conf| &mut conf.resolved)
                .collect(),
            BuildDocument::Plain(_) => Vec::new(),
        };
        for forest in forests {
            for node in forest.iter_mut() {
                node.renumber(0);
            }
        }
    }
}

/// The serialized form of a parsed workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub documents: Vec<BuildDocument>,
}
