use crate::dependency_analysis::domain::{
    walk, BuildDocument, DependencyNode, GradleProject, License, MavenProject, ResolvedCoordinate,
    Scope,
};
use crate::dependency_analysis::policies::LicenseClassification;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

/// Licenses seen per resolved coordinate, across the whole workspace.
pub type LicenseInventory = BTreeMap<ResolvedCoordinate, BTreeSet<License>>;

/// DependencyLicenseCheckUseCase - reports every license in use
///
/// Maven projects contribute the resolved tree of the selected scope, Gradle
/// projects every configuration. A dependency without declared licenses is
/// reported once with an empty name and type `Unknown`.
pub struct DependencyLicenseCheckUseCase {
    scope: String,
}

impl DependencyLicenseCheckUseCase {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    fn record<'a>(inventory: &mut LicenseInventory, nodes: impl Iterator<Item = &'a DependencyNode>) {
        for node in nodes {
            let licenses = inventory.entry(node.coordinate.clone()).or_default();
            if node.licenses.is_empty() {
                licenses.insert(License::undeclared());
            } else {
                licenses.extend(node.licenses.iter().cloned());
            }
        }
    }
}

#[async_trait]
impl ScanningAnalysis for DependencyLicenseCheckUseCase {
    type Accumulator = LicenseInventory;

    fn name(&self) -> &'static str {
        "licenses"
    }

    fn validate(&self) -> Result<()> {
        Scope::parse_selectable(&self.scope).map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {
        LicenseInventory::new()
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        let scope = Scope::parse_selectable(&self.scope)?;
        let mut inventory = self.initial_value();
        if let Some(nodes) = project.resolved.get(&scope.bucket()) {
            Self::record(&mut inventory, walk(nodes));
        }
        Ok(inventory)
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        let mut inventory = self.initial_value();
        for configuration in project.configurations.values() {
            Self::record(
                &mut inventory,
                walk(&configuration.resolved).filter(|node| !node.coordinate.version.trim().is_empty()),
            );
        }
        Ok(inventory)
    }

    async fn generate(
        &self,
        accumulator: &Self::Accumulator,
        _documents: &[BuildDocument],
        sink: &dyn ReportSink,
    ) -> Vec<BuildDocument> {
        for (coordinate, licenses) in accumulator {
            for license in licenses {
                sink.insert_row(ReportRow::License {
                    group: coordinate.group.clone(),
                    artifact: coordinate.artifact.clone(),
                    version: coordinate.version.clone(),
                    license_name: license.name.clone(),
                    license_type: LicenseClassification::classify(license).to_string(),
                });
            }
        }
        Vec::new()
    }
}
