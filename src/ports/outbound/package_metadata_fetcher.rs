use crate::dependency_analysis::domain::{DependencyDeclaration, Repository, ResolvedCoordinate};
use crate::shared::Result;
use async_trait::async_trait;

/// PackageMetadataFetcher port for reading a published artifact's own dependencies
///
/// Implementations look the coordinate up in the given repositories, in order,
/// and return the dependencies declared by its metadata (POM).
///
/// # Errors
/// Any non-success response, unparsable metadata, or absence of a usable
/// repository is an error. Callers treat errors as "unknown", never as "no dependencies".
#[async_trait]
pub trait PackageMetadataFetcher: Send + Sync {
    async fn fetch_dependencies(
        &self,
        coordinate: &ResolvedCoordinate,
        repositories: &[Repository],
    ) -> Result<Vec<DependencyDeclaration>>;
}
