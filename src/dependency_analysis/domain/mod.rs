pub mod accumulator;
pub mod build_document;
pub mod closure;
pub mod coordinate;
pub mod dependency_node;
pub mod license;
pub mod scope;
pub mod version;

pub use accumulator::{ClosureUnion, Merge, MinimumVersions, ProjectAccumulator};
pub use build_document::{
    BuildDocument, BuildTool, DeclaredDependency, GradleConfiguration, GradleProject,
    MavenProject, PlainDocument, Project, Workspace,
};
pub use closure::Closure;
pub use coordinate::{Coordinate, Repository, ResolvedCoordinate, MAVEN_CENTRAL_URI};
pub use dependency_node::{walk, DependencyDeclaration, DependencyNode};
pub use license::{License, LicenseType};
pub use scope::Scope;
pub use version::{Version, VersionComparator, VersionParser};
