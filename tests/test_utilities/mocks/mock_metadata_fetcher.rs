use async_trait::async_trait;
use depscope::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock PackageMetadataFetcher backed by an in-memory dependency graph.
///
/// Coordinates missing from the graph fail to fetch. Clones share the call log.
#[derive(Default, Clone)]
pub struct MockMetadataFetcher {
    graph: HashMap<ResolvedCoordinate, Vec<ResolvedCoordinate>>,
    calls: Arc<AtomicUsize>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(mut self, coordinate: &str, dependencies: &[&str]) -> Self {
        self.graph.insert(
            coordinate.parse().unwrap(),
            dependencies.iter().map(|d| d.parse().unwrap()).collect(),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// How often `coordinate` was fetched.
    pub fn fetch_count(&self, coordinate: &str) -> usize {
        self.fetched
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == coordinate)
            .count()
    }
}

#[async_trait]
impl PackageMetadataFetcher for MockMetadataFetcher {
    async fn fetch_dependencies(
        &self,
        coordinate: &ResolvedCoordinate,
        _repositories: &[Repository],
    ) -> Result<Vec<DependencyDeclaration>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(coordinate.to_string());
        match self.graph.get(coordinate) {
            Some(dependencies) => Ok(dependencies
                .iter()
                .cloned()
                .map(DependencyDeclaration::new)
                .collect()),
            None => anyhow::bail!("Artifact not found: {}", coordinate),
        }
    }
}
