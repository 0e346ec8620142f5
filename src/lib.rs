//! depscope - whole-project dependency analysis for Maven and Gradle builds
//!
//! Runs one analysis at a time over a workspace snapshot of parsed build
//! documents: finds redundant, outdated, relocated and vulnerable
//! dependencies, lists them, and keeps SBOMs next to every project.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_analysis`): Coordinates, versions, scopes,
//!   dependency trees and the decision logic over them
//! - **Application Layer** (`application`): The scan → generate → rewrite
//!   pipeline and one use case per analysis
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depscope::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let documents = FileSystemReader::new().read_workspace(Path::new("depscope-workspace.json"))?;
//!
//! let analysis = DependencyInsightUseCase::new("com.fasterxml.jackson.core", "*");
//! let sink = InMemoryReportSink::new();
//! let outcome = Pipeline::new(StderrProgressReporter::new())
//!     .run(&analysis, documents, &sink)
//!     .await?;
//!
//! println!("{}", JsonFormatter::new().format(&sink.rows())?);
//! println!("{} document(s) changed", outcome.changed.len());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CycloneDxFormatter, JsonFormatter, MarkdownFormatter,
    };
    pub use crate::adapters::outbound::network::{
        CachingMetadataFetcher, MavenRepositoryClient, OsvClient,
    };
    pub use crate::adapters::outbound::report::InMemoryReportSink;
    pub use crate::application::dto::{ListScope, PipelineOutcome, ReportFormat};
    pub use crate::application::services::ClosureResolver;
    pub use crate::application::use_cases::{
        CheckVulnerabilitiesUseCase, DependencyInsightUseCase, DependencyListUseCase,
        DependencyResolutionDiagnosticUseCase, FindMinimumDependencyVersionUseCase,
        RelocatedDependencyCheckUseCase, RemoveRedundantDependenciesUseCase,
        SoftwareBillOfMaterialsUseCase, UpgradeDependencyVersionUseCase,
    };
    pub use crate::application::Pipeline;
    pub use crate::dependency_analysis::domain::{
        BuildDocument, Closure, Coordinate, DependencyDeclaration, DependencyNode, GradleProject,
        MavenProject, Merge, PlainDocument, Project, ProjectAccumulator, Repository,
        ResolvedCoordinate, Scope, VersionComparator, Workspace,
    };
    pub use crate::dependency_analysis::policies::{Relocation, RelocationTable};
    pub use crate::dependency_analysis::services::{CoordinateMatcher, RedundancyDetector};
    pub use crate::ports::inbound::ScanningAnalysis;
    pub use crate::ports::outbound::{
        OutputPresenter, PackageMetadataFetcher, ProgressReporter, ReportFormatter, ReportRow,
        ReportSink, RepositoryChecker, SbomFormatter, VulnerabilityScanner, WorkspaceReader,
    };
    pub use crate::shared::Result;
}
