/// Network adapters for package repositories and vulnerability databases
mod caching_metadata_fetcher;
mod maven_repository_client;
mod osv_client;
mod pom_parser;

pub use caching_metadata_fetcher::CachingMetadataFetcher;
pub use maven_repository_client::MavenRepositoryClient;
pub use osv_client::OsvClient;
pub use pom_parser::PomDocument;
