use crate::dependency_analysis::domain::{Repository, ResolvedCoordinate};
use async_trait::async_trait;
use std::fmt;

/// Why a repository check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Short classification, e.g. `HttpStatus`, `Timeout`, `Connect`.
    pub error_type: String,
    pub message: String,
    pub http_code: Option<u16>,
}

impl CheckFailure {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            http_code: None,
        }
    }

    pub fn with_http_code(mut self, code: u16) -> Self {
        self.http_code = Some(code);
        self
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

/// RepositoryChecker port for checking that a repository is reachable and serves artifacts
#[async_trait]
pub trait RepositoryChecker: Send + Sync {
    /// Contacts the repository root.
    async fn ping(&self, repository: &Repository) -> Result<(), CheckFailure>;

    /// Downloads the metadata of a known artifact from the repository.
    async fn try_download(
        &self,
        coordinate: &ResolvedCoordinate,
        repository: &Repository,
    ) -> Result<(), CheckFailure>;
}
