use crate::dependency_analysis::domain::{GradleProject, MavenProject, Project, Scope};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::ReportSink;
use crate::shared::Result;
use async_trait::async_trait;

/// FindDependencyUseCase - marks direct declarations of a dependency
///
/// Transitive dependencies are not searched; `insight` covers those.
pub struct FindDependencyUseCase {
    group_pattern: String,
    artifact_pattern: String,
    version: Option<String>,
    configuration: Option<String>,
}

impl FindDependencyUseCase {
    pub fn new(group_pattern: impl Into<String>, artifact_pattern: impl Into<String>) -> Self {
        Self {
            group_pattern: group_pattern.into(),
            artifact_pattern: artifact_pattern.into(),
            version: None,
            configuration: None,
        }
    }

    /// Only declarations with exactly this version.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Gradle only: search a single configuration.
    pub fn with_configuration(mut self, configuration: Option<String>) -> Self {
        self.configuration = configuration;
        self
    }

    fn rewrite_project(&self, project: &mut dyn Project, configuration: Option<&str>) {
        let Ok(matcher) = CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern)
        else {
            return;
        };
        let markers: Vec<String> = project
            .declared()
            .iter()
            .filter(|dep| matcher.matches(&dep.group, &dep.artifact))
            .filter(|dep| {
                self.version
                    .as_ref()
                    .map_or(true, |version| dep.version.as_ref() == Some(version))
            })
            .filter(|dep| {
                configuration.map_or(true, |name| dep.scope.as_ref().map(Scope::name) == Some(name))
            })
            .map(|dep| match &dep.version {
                Some(version) => format!("Declared dependency: {}:{}:{}", dep.group, dep.artifact, version),
                None => format!("Declared dependency: {}:{}", dep.group, dep.artifact),
            })
            .collect();
        for marker in markers {
            project.add_marker(&marker);
        }
    }
}

#[async_trait]
impl ScanningAnalysis for FindDependencyUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "find"
    }

    fn validate(&self) -> Result<()> {
        CoordinateMatcher::new(&self.group_pattern, &self.artifact_pattern).map(|_| ())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), _sink: &dyn ReportSink) {
        self.rewrite_project(project, None);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), _sink: &dyn ReportSink) {
        self.rewrite_project(project, self.configuration.as_deref());
    }
}
