use crate::dependency_analysis::domain::ResolvedCoordinate;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

/// A known vulnerability affecting one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct VulnerabilityMatch {
    pub id: String,
    pub summary: Option<String>,
    pub severity: Option<String>,
}

impl VulnerabilityMatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: None,
            severity: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }
}

/// VulnerabilityScanner port: feed coordinates in, receive matches out.
///
/// The scanning engine is opaque; only coordinates with at least one match
/// appear in the result.
#[async_trait]
pub trait VulnerabilityScanner: Send + Sync {
    async fn scan(
        &self,
        coordinates: &[ResolvedCoordinate],
    ) -> Result<Vec<(ResolvedCoordinate, Vec<VulnerabilityMatch>)>>;
}
