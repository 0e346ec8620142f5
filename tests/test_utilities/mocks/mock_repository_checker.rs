use async_trait::async_trait;
use depscope::dependency_analysis::domain::{Repository, ResolvedCoordinate};
use depscope::ports::outbound::{CheckFailure, RepositoryChecker};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock RepositoryChecker with canned failures per repository URI.
///
/// Repositories without a canned failure answer both checks successfully.
#[derive(Default, Clone)]
pub struct MockRepositoryChecker {
    ping_failures: HashMap<String, CheckFailure>,
    download_failures: HashMap<String, CheckFailure>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockRepositoryChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ping_failure(mut self, uri: &str, failure: CheckFailure) -> Self {
        self.ping_failures.insert(uri.to_string(), failure);
        self
    }

    pub fn with_download_failure(mut self, uri: &str, failure: CheckFailure) -> Self {
        self.download_failures.insert(uri.to_string(), failure);
        self
    }

    /// URIs a download was attempted from, in call order.
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryChecker for MockRepositoryChecker {
    async fn ping(&self, repository: &Repository) -> Result<(), CheckFailure> {
        match self.ping_failures.get(repository.normalized_uri()) {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    async fn try_download(
        &self,
        _artifact: &ResolvedCoordinate,
        repository: &Repository,
    ) -> Result<(), CheckFailure> {
        let uri = repository.normalized_uri().to_string();
        self.downloads.lock().unwrap().push(uri.clone());
        match self.download_failures.get(&uri) {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}
