use super::dependency_query::DependencyQuery;
use crate::dependency_analysis::domain::{GradleProject, MavenProject, Project};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::ReportSink;
use crate::shared::Result;
use async_trait::async_trait;

/// DoesNotIncludeDependencyUseCase - marks projects that do not resolve a
/// dependency
pub struct DoesNotIncludeDependencyUseCase {
    group_pattern: String,
    artifact_pattern: String,
    version: Option<String>,
    only_direct: bool,
    scope: Option<String>,
    configuration: Option<String>,
}

impl DoesNotIncludeDependencyUseCase {
    pub fn new(group_pattern: impl Into<String>, artifact_pattern: impl Into<String>) -> Self {
        Self {
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
            version: None,
            only_direct: false,
            scope: None,
            configuration: None,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Ignore transitive occurrences.
    pub fn only_direct(mut self, only_direct: bool) -> Self {
        self.only_direct = only_direct;
        self
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    /// Gradle only; takes precedence over the scope.
    pub fn with_configuration(mut self, configuration: Option<String>) -> Self {
        self.configuration = configuration;
        self
    }

    fn query(&self) -> Result<DependencyQuery> {
        Ok(
            DependencyQuery::new(&self.group_pattern, &self.artifact_pattern)?
                .version(self.version.as_deref())
                .scope(self.scope.as_deref())?
                .configuration(self.configuration.as_deref())
                .only_direct(self.only_direct),
        )
    }

    fn rewrite_project(&self, project: &mut dyn Project) {
        let Ok(query) = self.query() else {
            return;
        };
        if !query.found_in(project) {
            project.add_marker(&format!("Does not include dependency: {}", query.describe()));
        }
    }
}

#[async_trait]
impl ScanningAnalysis for DoesNotIncludeDependencyUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "does-not-include"
    }

    fn validate(&self) -> Result<()> {
        self.query().map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), _sink: &dyn ReportSink) {
        self.rewrite_project(project);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), _sink: &dyn ReportSink) {
        self.rewrite_project(project);
    }
}
