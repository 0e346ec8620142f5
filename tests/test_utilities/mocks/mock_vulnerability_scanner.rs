use async_trait::async_trait;
use depscope::dependency_analysis::domain::ResolvedCoordinate;
use depscope::ports::outbound::{VulnerabilityMatch, VulnerabilityScanner};
use depscope::shared::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock VulnerabilityScanner with canned advisories per coordinate.
#[derive(Default, Clone)]
pub struct MockVulnerabilityScanner {
    advisories: HashMap<ResolvedCoordinate, Vec<VulnerabilityMatch>>,
    should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockVulnerabilityScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_advisory(mut self, coordinate: &str, advisory: VulnerabilityMatch) -> Self {
        self.advisories
            .entry(coordinate.parse().unwrap())
            .or_default()
            .push(advisory);
        self
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VulnerabilityScanner for MockVulnerabilityScanner {
    async fn scan(
        &self,
        coordinates: &[ResolvedCoordinate],
    ) -> Result<Vec<(ResolvedCoordinate, Vec<VulnerabilityMatch>)>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock vulnerability database unavailable");
        }
        Ok(coordinates
            .iter()
            .map(|c| (c.clone(), self.advisories.get(c).cloned().unwrap_or_default()))
            .collect())
    }
}
