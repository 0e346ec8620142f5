/// Mock implementations for testing
mod mock_metadata_fetcher;
mod mock_progress_reporter;
mod mock_repository_checker;
mod mock_vulnerability_scanner;

pub use mock_metadata_fetcher::MockMetadataFetcher;
pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
pub use mock_repository_checker::MockRepositoryChecker;
pub use mock_vulnerability_scanner::MockVulnerabilityScanner;
