use crate::dependency_analysis::domain::{DeclaredDependency, GradleProject, MavenProject, Project};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use crate::shared::Result;
use anyhow::bail;
use async_trait::async_trait;

/// ChangeDependencyUseCase - moves declarations to new coordinates
///
/// Unset targets keep the declaration's current value. A new version only
/// replaces an explicit version unless managed versions are overridden.
pub struct ChangeDependencyUseCase {
    old_group_pattern: String,
    old_artifact_pattern: String,
    new_group: Option<String>,
    new_artifact: Option<String>,
    new_version: Option<String>,
    override_managed_version: bool,
}

impl ChangeDependencyUseCase {
    pub fn new(old_group_pattern: impl Into<String>, old_artifact_pattern: impl Into<String>) -> Self {
        Self {
            old_group_pattern: old_group_pattern.into(),
            old_artifact_pattern: old_artifact_pattern.into(),
            new_group: None,
            new_artifact: None,
            new_version: None,
            override_managed_version: false,
        }
    }

    pub fn with_new_group(mut self, group: Option<String>) -> Self {
        self.new_group = group;
        self
    }

    pub fn with_new_artifact(mut self, artifact: Option<String>) -> Self {
        self.new_artifact = artifact;
        self
    }

    pub fn with_new_version(mut self, version: Option<String>) -> Self {
        self.new_version = version;
        self
    }

    pub fn override_managed_version(mut self, enabled: bool) -> Self {
        self.override_managed_version = enabled;
        self
    }

    fn changed(&self, dependency: &DeclaredDependency) -> DeclaredDependency {
        let mut changed = dependency.clone();
        if let Some(group) = &self.new_group {
            changed.group = group.clone();
        }
        if let Some(artifact) = &self.new_artifact {
            changed.artifact = artifact.clone();
        }
        if let Some(version) = &self.new_version {
            if changed.version.is_some() || self.override_managed_version {
                changed.version = Some(version.clone());
            }
        }
        changed
    }

    fn rewrite_project(&self, project: &mut dyn Project, sink: &dyn ReportSink) {
        let Ok(matcher) =
            CoordinateMatcher::new(&self.old_group_pattern, &self.old_artifact_pattern)
        else {
            return;
        };
        let key = project.project_key();
        for dependency in project.declared_mut() {
            if !matcher.matches(&dependency.group, &dependency.artifact) {
                continue;
            }
            let changed = self.changed(dependency);
            if changed == *dependency {
                continue;
            }
            sink.insert_row(ReportRow::ChangedDependency {
                project: key.clone(),
                from: describe(dependency),
                to: describe(&changed),
            });
            *dependency = changed;
        }
    }
}

fn describe(dependency: &DeclaredDependency) -> String {
    match &dependency.version {
        Some(version) => format!("{}:{}:{}", dependency.group, dependency.artifact, version),
        None => format!("{}:{}", dependency.group, dependency.artifact),
    }
}

#[async_trait]
impl ScanningAnalysis for ChangeDependencyUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "change"
    }

    fn validate(&self) -> Result<()> {
        CoordinateMatcher::new(&self.old_group_pattern, &self.old_artifact_pattern)?;
        let targets = [&self.new_group, &self.new_artifact, &self.new_version];
        if targets.iter().all(|target| target.is_none()) {
            bail!("At least one of new group, new artifact or new version is required");
        }
        for target in targets.into_iter().flatten() {
            if target.trim().is_empty() || target.contains(':') || target.contains('*') {
                bail!("Invalid change target '{}'", target);
            }
        }
        Ok(())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{
        declared, gradle_project, maven_project, CollectingSink,
    };
    use crate::dependency_analysis::domain::Scope;

    fn service() -> MavenProject {
        maven_project(
            "service/pom.xml",
            "service",
            vec![
                declared("javax.activation:activation:1.1.1"),
                DeclaredDependency::new("javax.activation", "javax.activation-api"),
                declared("org.slf4j:slf4j-api:2.0.9"),
            ],
            vec![],
        )
    }

    #[test]
    fn test_changes_group_and_artifact() {
        let mut project = service();
        let sink = CollectingSink::default();

        ChangeDependencyUseCase::new("javax.activation", "activation")
            .with_new_group(Some("jakarta.activation".to_string()))
            .with_new_artifact(Some("jakarta.activation-api".to_string()))
            .rewrite_maven(&mut project, &(), &sink);

        assert_eq!(
            project.dependencies[0],
            declared("jakarta.activation:jakarta.activation-api:1.1.1")
        );
        assert_eq!(
            sink.rows(),
            vec![ReportRow::ChangedDependency {
                project: "com.example:service".to_string(),
                from: "javax.activation:activation:1.1.1".to_string(),
                to: "jakarta.activation:jakarta.activation-api:1.1.1".to_string(),
            }]
        );
    }

    #[test]
    fn test_new_version_skips_managed_declarations() {
        let mut project = service();

        ChangeDependencyUseCase::new("javax.activation", "*")
            .with_new_group(Some("jakarta.activation".to_string()))
            .with_new_version(Some("2.1.3".to_string()))
            .rewrite_maven(&mut project, &(), &CollectingSink::default());

        assert_eq!(project.dependencies[0].version.as_deref(), Some("2.1.3"));
        assert_eq!(project.dependencies[1].group, "jakarta.activation");
        assert_eq!(project.dependencies[1].version, None);
    }

    #[test]
    fn test_override_managed_version() {
        let mut project = service();

        ChangeDependencyUseCase::new("javax.activation", "javax.activation-api")
            .with_new_version(Some("1.2.0".to_string()))
            .override_managed_version(true)
            .rewrite_maven(&mut project, &(), &CollectingSink::default());

        assert_eq!(project.dependencies[1].version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_gradle_declaration_keeps_configuration() {
        let mut project = gradle_project(
            "app/build.gradle",
            "app",
            vec![declared("javax.activation:activation:1.1.1").with_scope(Scope::parse("api"))],
            vec![],
        );

        ChangeDependencyUseCase::new("javax.*", "*")
            .with_new_group(Some("jakarta.activation".to_string()))
            .rewrite_gradle(&mut project, &(), &CollectingSink::default());

        assert_eq!(project.dependencies[0].group, "jakarta.activation");
        assert_eq!(project.dependencies[0].scope, Some(Scope::parse("api")));
    }

    #[test]
    fn test_unchanged_declarations_are_not_reported() {
        let mut project = service();
        let sink = CollectingSink::default();

        ChangeDependencyUseCase::new("org.slf4j", "slf4j-api")
            .with_new_version(Some("2.0.9".to_string()))
            .rewrite_maven(&mut project, &(), &sink);

        assert!(sink.rows().is_empty());
    }

    #[test]
    fn test_validation() {
        let nothing = ChangeDependencyUseCase::new("javax.activation", "*");
        assert!(nothing.validate().is_err());

        let glob_target = ChangeDependencyUseCase::new("javax.activation", "*")
            .with_new_group(Some("jakarta.*".to_string()));
        assert!(glob_target.validate().is_err());

        let ok = ChangeDependencyUseCase::new("javax.activation", "*")
            .with_new_artifact(Some("jakarta.activation-api".to_string()));
        assert!(ok.validate().is_ok());
    }
}
