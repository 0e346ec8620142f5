use super::dependency_query::DependencyQuery;
use crate::dependency_analysis::domain::{GradleProject, MavenProject, Project};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::ReportSink;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// ModuleHasDependencyUseCase - marks every document of a module that
/// resolves a dependency
///
/// A module is a project identity, so a Gradle project split over several
/// documents is marked in all of them as soon as one resolves the dependency.
pub struct ModuleHasDependencyUseCase {
    group_pattern: String,
    artifact_pattern: String,
    scope: Option<String>,
    version: Option<String>,
}

impl ModuleHasDependencyUseCase {
    pub fn new(group_pattern: impl Into<String>, artifact_pattern: impl Into<String>) -> Self {
        Self {
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
            scope: None,
            version: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    fn query(&self) -> Result<DependencyQuery> {
        DependencyQuery::new(&self.group_pattern, &self.artifact_pattern)?
            .version(self.version.as_deref())
            .scope(self.scope.as_deref())
    }

    fn scan_project(&self, project: &dyn Project) -> Result<BTreeSet<String>> {
        let mut modules = BTreeSet::new();
        if self.query()?.found_in(project) {
            modules.insert(project.project_key());
        }
        Ok(modules)
    }

    fn rewrite_project(&self, project: &mut dyn Project, modules: &BTreeSet<String>) {
        if !modules.contains(&project.project_key()) {
            return;
        }
        if let Ok(query) = self.query() {
            project.add_marker(&format!("Module has dependency: {}", query.describe()));
        }
    }
}

#[async_trait]
impl ScanningAnalysis for ModuleHasDependencyUseCase {
    type Accumulator = BTreeSet<String>;

    fn name(&self) -> &'static str {
        "module-has"
    }

    fn validate(&self) -> Result<()> {
        self.query().map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {
        BTreeSet::new()
    }

    async fn scan_maven(&self, project: &MavenProject) -> Result<Self::Accumulator> {
        self.scan_project(project)
    }

    async fn scan_gradle(&self, project: &GradleProject) -> Result<Self::Accumulator> {
        self.scan_project(project)
    }

    fn rewrite_maven(
        &self,
        project: &mut MavenProject,
        accumulator: &Self::Accumulator,
        _sink: &dyn ReportSink,
    ) {
        self.rewrite_project(project, accumulator);
    }

    fn rewrite_gradle(
        &self,
        project: &mut GradleProject,
        accumulator: &Self::Accumulator,
        _sink: &dyn ReportSink,
    ) {
        self.rewrite_project(project, accumulator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{gradle_project, node, CollectingSink};
    use crate::dependency_analysis::domain::{DependencyNode, Merge};

    fn web(path: &str, configurations: Vec<(&str, Vec<DependencyNode>)>) -> GradleProject {
        gradle_project(path, "web", vec![], configurations)
    }

    #[tokio::test]
    async fn test_every_document_of_the_module_is_marked() {
        let use_case = ModuleHasDependencyUseCase::new("jakarta.data", "*");
        let mut with_dependency = web(
            "web/build.gradle",
            vec![("runtimeClasspath", vec![node("jakarta.data:jakarta.data-api:1.0.0", vec![])])],
        );
        let mut settings_only = web("web/settings.gradle", vec![]);
        let mut other = gradle_project("api/build.gradle", "api", vec![], vec![]);

        let mut modules = use_case.scan_gradle(&settings_only).await.unwrap();
        modules.merge(use_case.scan_gradle(&with_dependency).await.unwrap());
        modules.merge(use_case.scan_gradle(&other).await.unwrap());

        let sink = CollectingSink::default();
        for project in [&mut with_dependency, &mut settings_only, &mut other] {
            use_case.rewrite_gradle(project, &modules, &sink);
        }

        assert_eq!(with_dependency.markers, vec!["Module has dependency: jakarta.data:*"]);
        assert_eq!(settings_only.markers, with_dependency.markers);
        assert!(other.markers.is_empty());
    }

    #[tokio::test]
    async fn test_version_appears_in_marker() {
        let use_case = ModuleHasDependencyUseCase::new("jakarta.data", "*")
            .with_version(Some("1.0.0".to_string()));
        let mut project = web(
            "web/build.gradle",
            vec![("runtimeClasspath", vec![node("jakarta.data:jakarta.data-api:1.0.0", vec![])])],
        );

        let modules = use_case.scan_gradle(&project).await.unwrap();
        use_case.rewrite_gradle(&mut project, &modules, &CollectingSink::default());

        assert_eq!(project.markers, vec!["Module has dependency: jakarta.data:*:1.0.0"]);
    }

    #[tokio::test]
    async fn test_scope_limits_the_search() {
        let use_case = ModuleHasDependencyUseCase::new("jakarta.data", "*")
            .with_scope(Some("compile".to_string()));
        let project = web(
            "web/build.gradle",
            vec![("runtimeClasspath", vec![node("jakarta.data:jakarta.data-api:1.0.0", vec![])])],
        );

        assert!(use_case.scan_gradle(&project).await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_scope_fails_validation() {
        let use_case = ModuleHasDependencyUseCase::new("jakarta.data", "*")
            .with_scope(Some("annotationProcessor".to_string()));
        assert!(use_case.validate().is_err());
    }
}
