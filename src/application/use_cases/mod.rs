/// Use cases module: one analysis per file, each driven by the pipeline
mod change_dependency;
mod check_vulnerabilities;
mod dependency_insight;
mod dependency_license_check;
mod dependency_list;
mod dependency_query;
mod dependency_resolution_diagnostic;
mod does_not_include_dependency;
mod find_dependency;
mod find_minimum_dependency_version;
mod find_repository_order;
mod module_has_dependency;
mod occurrences;
mod relocated_dependency_check;
mod remove_dependency;
mod remove_redundant_dependencies;
mod software_bill_of_materials;
mod upgrade_dependency_version;

#[cfg(test)]
mod test_support;

pub use change_dependency::ChangeDependencyUseCase;
pub use check_vulnerabilities::{CheckVulnerabilitiesUseCase, VulnerabilityIndex};
pub use dependency_insight::DependencyInsightUseCase;
pub use dependency_license_check::{DependencyLicenseCheckUseCase, LicenseInventory};
pub use dependency_list::{DependencyListUseCase, GradleProjectPaths};
pub use dependency_resolution_diagnostic::{
    DependencyResolutionDiagnosticUseCase, RepositoryInventory, DEFAULT_CHECK_COORDINATE,
};
pub use does_not_include_dependency::DoesNotIncludeDependencyUseCase;
pub use find_dependency::FindDependencyUseCase;
pub use find_minimum_dependency_version::FindMinimumDependencyVersionUseCase;
pub use find_repository_order::FindRepositoryOrderUseCase;
pub use module_has_dependency::ModuleHasDependencyUseCase;
pub use relocated_dependency_check::RelocatedDependencyCheckUseCase;
pub use remove_dependency::RemoveDependencyUseCase;
pub use remove_redundant_dependencies::RemoveRedundantDependenciesUseCase;
pub use software_bill_of_materials::{
    sbom_path, sbom_subject, SbomInventory, SoftwareBillOfMaterialsUseCase, SBOM_FILE_NAME,
};
pub use upgrade_dependency_version::UpgradeDependencyVersionUseCase;
