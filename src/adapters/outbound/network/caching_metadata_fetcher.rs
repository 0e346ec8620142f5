use crate::dependency_analysis::domain::{DependencyDeclaration, Repository, ResolvedCoordinate};
use crate::ports::outbound::PackageMetadataFetcher;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingMetadataFetcher wraps a PackageMetadataFetcher and adds in-memory caching.
///
/// The same artifact shows up in many closures, so every resolution in a run
/// shares one cache. Failures are not cached, and nothing outlives the process.
pub struct CachingMetadataFetcher<F: PackageMetadataFetcher> {
    inner: F,
    cache: Arc<DashMap<ResolvedCoordinate, Vec<DependencyDeclaration>>>,
}

impl<F: PackageMetadataFetcher> CachingMetadataFetcher<F> {
    /// Creates a new caching fetcher wrapping the given inner fetcher
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<F: PackageMetadataFetcher> PackageMetadataFetcher for CachingMetadataFetcher<F> {
    async fn fetch_dependencies(
        &self,
        coordinate: &ResolvedCoordinate,
        repositories: &[Repository],
    ) -> Result<Vec<DependencyDeclaration>> {
        if let Some(cached) = self.cache.get(coordinate) {
            return Ok(cached.clone());
        }

        let declarations = self.inner.fetch_dependencies(coordinate, repositories).await?;
        self.cache.insert(coordinate.clone(), declarations.clone());

        Ok(declarations)
    }
}
