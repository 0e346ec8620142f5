use super::pom_parser::PomDocument;
use crate::dependency_analysis::domain::{DependencyDeclaration, Repository, ResolvedCoordinate};
use crate::ports::outbound::{PackageMetadataFetcher, CheckFailure, RepositoryChecker};
use crate::shared::error::DepscopeError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// MavenRepositoryClient adapter for Maven-layout HTTP repositories
///
/// Fetches published POMs to learn an artifact's own dependencies, and checks
/// that repositories are reachable. Repositories are tried in order; the
/// first one that serves the POM wins.
pub struct MavenRepositoryClient {
    client: reqwest::Client,
}

impl MavenRepositoryClient {
    /// Creates a new client with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depscope/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Validates a coordinate component for URL safety
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        // Security: Prevent URL injection attacks
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }

        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!(
                "Security: {} contains URL-unsafe characters",
                component_type
            );
        }

        Ok(())
    }

    /// `<repository>/<group path>/<artifact>/<version>/<artifact>-<version>.pom`
    pub fn pom_url(repository: &Repository, coordinate: &ResolvedCoordinate) -> Result<String> {
        Self::validate_url_component(&coordinate.group, "Group id")?;
        Self::validate_url_component(&coordinate.artifact, "Artifact id")?;
        Self::validate_url_component(&coordinate.version, "Version")?;

        let group_path = coordinate
            .group
            .split('.')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let artifact = urlencoding::encode(&coordinate.artifact);
        let version = urlencoding::encode(&coordinate.version);

        Ok(format!(
            "{}/{}/{}/{}/{}-{}.pom",
            repository.normalized_uri(),
            group_path,
            artifact,
            version,
            artifact,
            version
        ))
    }

    /// Downloads a POM. `Ok(None)` means the repository does not have it.
    async fn fetch_pom(
        &self,
        repository: &Repository,
        coordinate: &ResolvedCoordinate,
    ) -> Result<Option<String>> {
        let url = Self::pom_url(repository, coordinate)?;
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", url, response.status());
        }

        Ok(Some(response.text().await?))
    }

    async fn get(&self, url: &str) -> std::result::Result<(), CheckFailure> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CheckFailure::new(
                "HttpStatus",
                status.canonical_reason().unwrap_or("Unexpected status"),
            )
            .with_http_code(status.as_u16()))
        }
    }
}

fn classify(error: reqwest::Error) -> CheckFailure {
    let error_type = if error.is_timeout() {
        "Timeout"
    } else if error.is_connect() {
        "Connect"
    } else if error.is_request() {
        "Request"
    } else {
        "Transport"
    };
    let failure = CheckFailure::new(error_type, error.to_string());
    match error.status() {
        Some(status) => failure.with_http_code(status.as_u16()),
        None => failure,
    }
}

#[async_trait]
impl PackageMetadataFetcher for MavenRepositoryClient {
    async fn fetch_dependencies(
        &self,
        coordinate: &ResolvedCoordinate,
        repositories: &[Repository],
    ) -> Result<Vec<DependencyDeclaration>> {
        for repository in repositories {
            match self.fetch_pom(repository, coordinate).await {
                Ok(Some(content)) => return Ok(PomDocument::parse(&content)?.declarations()),
                Ok(None) => continue,
                Err(e) => {
                    debug!("Fetching {} from {} failed: {:#}", coordinate, repository.uri, e);
                }
            }
        }

        Err(DepscopeError::MetadataNotFound {
            coordinate: coordinate.to_string(),
            repositories: repositories.len(),
        }
        .into())
    }
}

#[async_trait]
impl RepositoryChecker for MavenRepositoryClient {
    async fn ping(&self, repository: &Repository) -> std::result::Result<(), CheckFailure> {
        self.get(&format!("{}/", repository.normalized_uri())).await
    }

    async fn try_download(
        &self,
        coordinate: &ResolvedCoordinate,
        repository: &Repository,
    ) -> std::result::Result<(), CheckFailure> {
        let url = Self::pom_url(repository, coordinate)
            .map_err(|e| CheckFailure::new("InvalidCoordinate", e.to_string()))?;
        self.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(MavenRepositoryClient::new().is_ok());
    }

    #[test]
    fn test_pom_url_layout() {
        let url = MavenRepositoryClient::pom_url(
            &Repository::new("central", "https://repo.maven.apache.org/maven2/"),
            &ResolvedCoordinate::new("com.fasterxml.jackson.core", "jackson-core", "2.16.0"),
        )
        .unwrap();

        assert_eq!(
            url,
            "https://repo.maven.apache.org/maven2/com/fasterxml/jackson/core/jackson-core/2.16.0/jackson-core-2.16.0.pom"
        );
    }

    #[test]
    fn test_pom_url_rejects_path_traversal() {
        let result = MavenRepositoryClient::pom_url(
            &Repository::maven_central(),
            &ResolvedCoordinate::new("com.example", "../../etc", "1.0"),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_repositories_is_not_found() {
        let client = MavenRepositoryClient::new().unwrap();
        let error = client
            .fetch_dependencies(&ResolvedCoordinate::new("g", "a", "1"), &[])
            .await
            .unwrap_err();

        assert!(error.to_string().contains("No metadata found for g:a:1"));
    }
}
