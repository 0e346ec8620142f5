/// Outbound ports (driven ports) - infrastructure interfaces
///
/// The analysis core reaches package repositories, vulnerability databases,
/// the file system and the console only through these traits.
pub mod formatter;
pub mod output_presenter;
pub mod package_metadata_fetcher;
pub mod progress_reporter;
pub mod report_sink;
pub mod repository_checker;
pub mod vulnerability_scanner;
pub mod workspace_reader;

pub use formatter::{ReportFormatter, SbomFormatter, SbomSubject};
pub use output_presenter::OutputPresenter;
pub use package_metadata_fetcher::PackageMetadataFetcher;
pub use progress_reporter::ProgressReporter;
pub use report_sink::{ReportRow, ReportSink};
pub use repository_checker::{CheckFailure, RepositoryChecker};
pub use vulnerability_scanner::{VulnerabilityMatch, VulnerabilityScanner};
pub use workspace_reader::WorkspaceReader;
