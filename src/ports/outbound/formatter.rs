use crate::dependency_analysis::domain::{License, ResolvedCoordinate};
use crate::ports::outbound::report_sink::ReportRow;
use crate::shared::Result;
use std::collections::BTreeMap;

/// What an SBOM describes: one project, its components and their edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomSubject {
    pub project: ResolvedCoordinate,
    pub components: Vec<ResolvedCoordinate>,
    /// Direct dependencies of the project and of each component.
    pub edges: BTreeMap<ResolvedCoordinate, Vec<ResolvedCoordinate>>,
    /// Declared licenses of components that have any.
    pub licenses: BTreeMap<ResolvedCoordinate, Vec<License>>,
}

/// SbomFormatter port for rendering an SBOM document
pub trait SbomFormatter: Send + Sync {
    fn format(&self, subject: &SbomSubject) -> Result<String>;

    /// Whether `existing` already describes `subject`, ignoring volatile fields
    /// such as timestamps and serial numbers.
    fn is_equivalent(&self, existing: &str, subject: &SbomSubject) -> bool;
}

/// ReportFormatter port for rendering collected report rows
pub trait ReportFormatter {
    fn format(&self, rows: &[ReportRow]) -> Result<String>;
}
