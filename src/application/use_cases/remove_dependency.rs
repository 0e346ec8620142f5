use crate::dependency_analysis::domain::{
    DeclaredDependency, GradleProject, MavenProject, Project, Scope,
};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use crate::shared::Result;
use async_trait::async_trait;

/// RemoveDependencyUseCase - drops matching declarations from build files
///
/// A Maven scope filter also removes declarations of every scope whose
/// dependencies are part of that scope's set, so `runtime` removes `compile`
/// declarations too. A Gradle configuration filter is matched exactly.
pub struct RemoveDependencyUseCase {
    group_pattern: String,
    artifact_pattern: String,
    scope: Option<String>,
    configuration: Option<String>,
}

impl RemoveDependencyUseCase {
    pub fn new(group_pattern: impl Into<String>, artifact_pattern: impl Into<String>) -> Self {
        Self {
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
            scope: None,
            configuration: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_configuration(mut self, configuration: Option<String>) -> Self {
        self.configuration = configuration;
        self
    }

    fn selected_scope(&self) -> Result<Option<Scope>> {
        self.scope
            .as_deref()
            .map(Scope::parse_selectable)
            .transpose()
    }

    fn rewrite_project(
        &self,
        project: &mut dyn Project,
        in_filter: impl Fn(&DeclaredDependency) -> bool,
        sink: &dyn ReportSink,
    ) {
        let Ok(matcher) = CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)
        else {
            return;
        };
        let key = project.project_key();
        let declared = std::mem::take(project.declared_mut());
        let (removed, kept): (Vec<_>, Vec<_>) = declared
            .into_iter()
            .partition(|dep| matcher.matches(&dep.group, &dep.artifact) && in_filter(dep));
        *project.declared_mut() = kept;

        for dependency in removed {
            sink.insert_row(ReportRow::RemovedDependency {
                project: key.clone(),
                scope: dependency
                    .scope
                    .as_ref()
                    .map(|s| s.name().to_string())
                    .unwrap_or_default(),
                group: dependency.group,
                artifact: dependency.artifact,
                version: dependency.version,
            });
        }
    }
}

#[async_trait]
impl ScanningAnalysis for RemoveDependencyUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "remove"
    }

    fn validate(&self) -> Result<()> {
        CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)?;
        self.selected_scope().map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), sink: &dyn ReportSink) {
        let Ok(scope) = self.selected_scope() else {
            return;
        };
        self.rewrite_project(
            project,
            |dep| {
                scope.as_ref().map_or(true, |requested| {
                    dep.scope
                        .as_ref()
                        .unwrap_or(&Scope::Compile)
                        .broader_than(requested)
                })
            },
            sink,
        );
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), sink: &dyn ReportSink) {
        let configuration = self.configuration.as_deref();
        self.rewrite_project(
            project,
            |dep| {
                configuration.map_or(true, |name| {
                    dep.scope.as_ref().map(Scope::name) == Some(name)
                })
            },
            sink,
        );
    }
}
