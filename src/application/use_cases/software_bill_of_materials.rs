use crate::dependency_analysis::domain::{
    walk, BuildDocument, GradleProject, License, MavenProject, Merge, PlainDocument, Project,
    ResolvedCoordinate,
};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportSink, SbomFormatter, SbomSubject};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SBOM_FILE_NAME: &str = "sbom.json";

/// Existing SBOM documents and the SBOMs the workspace should have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbomInventory {
    pub existing: BTreeSet<PathBuf>,
    /// Target path, then source document path, then what to render.
    pub targets: BTreeMap<PathBuf, BTreeMap<PathBuf, SbomSubject>>,
}

impl SbomInventory {
    /// Subject rendered into `target`. When several documents share a
    /// directory, the one with the lowest path wins.
    pub fn subject_for(&self, target: &Path) -> Option<&SbomSubject> {
        self.targets
            .get(target)
            .and_then(|sources| sources.values().next())
    }
}

impl Merge for SbomInventory {
    fn merge(&mut self, other: Self) {
        self.existing.extend(other.existing);
        for (target, sources) in other.targets {
            let entry = self.targets.entry(target).or_default();
            for (source, subject) in sources {
                entry.entry(source).or_insert(subject);
            }
        }
    }
}

/// Where the SBOM of a project document lives.
pub fn sbom_path(document: &Path) -> PathBuf {
    document
        .parent()
        .map(|dir| dir.join(SBOM_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SBOM_FILE_NAME))
}

/// The project, every resolved component in any scope, and the edges
/// between them.
pub fn sbom_subject(project: &dyn Project) -> SbomSubject {
    let identity = project.identity();
    let mut components = BTreeSet::new();
    let mut edges: BTreeMap<ResolvedCoordinate, BTreeSet<ResolvedCoordinate>> = BTreeMap::new();
    let mut licenses: BTreeMap<ResolvedCoordinate, BTreeSet<License>> = BTreeMap::new();

    for (_, nodes) in project.resolved_scopes() {
        edges
            .entry(identity.clone())
            .or_default()
            .extend(nodes.iter().map(|n| n.coordinate.clone()));
        for node in walk(nodes) {
            components.insert(node.coordinate.clone());
            if !node.licenses.is_empty() {
                licenses
                    .entry(node.coordinate.clone())
                    .or_default()
                    .extend(node.licenses.iter().cloned());
            }
            edges
                .entry(node.coordinate.clone())
                .or_default()
                .extend(node.children.iter().map(|c| c.coordinate.clone()));
        }
    }

    SbomSubject {
        project: identity,
        components: components.into_iter().collect(),
        edges: edges
            .into_iter()
            .map(|(from, to)| (from, to.into_iter().collect()))
            .collect(),
        licenses: licenses
            .into_iter()
            .map(|(coordinate, set)| (coordinate, set.into_iter().collect()))
            .collect(),
    }
}

/// SoftwareBillOfMaterialsUseCase - keeps an SBOM next to every project
///
/// # Type Parameters
/// * `S` - SbomFormatter implementation
pub struct SoftwareBillOfMaterialsUseCase<S> {
    formatter: S,
}

impl<S: SbomFormatter> SoftwareBillOfMaterialsUseCase<S> {
    pub fn new(formatter: S) -> Self {
        Self { formatter }
    }

    fn scan_project(project: &dyn Project) -> SbomInventory {
        let target = sbom_path(project.path());
        let sources = BTreeMap::from([(project.path().to_path_buf(), sbom_subject(project))]);
        SbomInventory {
            existing: BTreeSet::new(),
            targets: BTreeMap::from([(target, sources)]),
        }
    }
}

#[async_trait]
impl<S: SbomFormatter> ScanningAnalysis for SoftwareBillOfMaterialsUseCase<S> {
    type Accumulator = SbomInventory;

    fn name(&self) -> &'static str {
        "sbom"
    }

    fn initial_value(&self) -> Self::Accumulator {
        SbomInventory::default()
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        Ok(Self::scan_project(project))
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        Ok(Self::scan_project(project))
    }

    async fn scan_plain(&self, document: &PlainDocument) -> Result<Self::Accumulator> {
        let mut inventory = SbomInventory::default();
        if document.path.file_name().is_some_and(|name| name == SBOM_FILE_NAME) {
            inventory.existing.insert(document.path.clone());
        }
        Ok(inventory)
    }

    async fn generate(
        &self,
        accumulator: &Self::Accumulator,
        _documents: &[BuildDocument],
        _sink: &dyn ReportSink,
    ) -> Vec<BuildDocument> {
        accumulator
            .targets
            .keys()
            .filter(|target| !accumulator.existing.contains(*target))
            .map(|target| BuildDocument::Plain(PlainDocument::new(target.clone(), String::new())))
            .collect()
    }

    fn rewrite_plain(
        &self,
        document: &mut PlainDocument,
        accumulator: &Self::Accumulator,
        _sink: &dyn ReportSink,
    ) {
        let Some(subject) = accumulator.subject_for(&document.path) else {
            return;
        };
        if self.formatter.is_equivalent(&document.content, subject) {
            return;
        }
        match self.formatter.format(subject) {
            Ok(content) => document.content = content,
            Err(e) => warn!("Could not render SBOM {}: {:#}", document.path.display(), e),
        }
    }
}
