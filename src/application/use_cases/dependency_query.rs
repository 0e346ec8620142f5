use crate::dependency_analysis::domain::{walk, BuildTool, DependencyNode, Project, Scope};
use crate::dependency_analysis::services::CoordinateMatcher;
use crate::shared::Result;

/// Does a project resolve a dependency? Shared by the module-level searches.
///
/// A Maven scope selects that scope's classpath (the scope and every broader
/// one). For Gradle an explicit configuration wins; otherwise a scope selects
/// the matching classpath configurations. No filter searches everything.
pub(crate) struct DependencyQuery {
    matcher: CoordinateMatcher,
    version: Option<String>,
    scope: Option<Scope>,
    configuration: Option<String>,
    only_direct: bool,
}

impl DependencyQuery {
    pub fn new(group_pattern: &str, artifact_pattern: &str) -> Result<Self> {
        Ok(Self {
            matcher: CoordinateMatcher::new(group_pattern, artifact_pattern)?,
            version: None,
            scope: None,
            configuration: None,
            only_direct: false,
        })
    }

    pub fn version(mut self, version: Option<&str>) -> Self {
        self.version = version.map(str::to_string);
        self
    }

    pub fn scope(mut self, scope: Option<&str>) -> Result<Self> {
        self.scope = scope.map(Scope::parse_selectable).transpose()?;
        Ok(self)
    }

    pub fn configuration(mut self, configuration: Option<&str>) -> Self {
        self.configuration = configuration.map(str::to_string);
        self
    }

    pub fn only_direct(mut self, only_direct: bool) -> Self {
        self.only_direct = only_direct;
        self
    }

    /// `group:artifact[:version]` as given, for marker messages.
    pub fn describe(&self) -> String {
        match &self.version {
            Some(version) => format!("{}:{}", self.matcher.describe(), version),
            None => self.matcher.describe(),
        }
    }

    pub fn found_in(&self, project: &dyn Project) -> bool {
        let tool = project.build_tool();
        project
            .resolved_scopes()
            .into_iter()
            .filter(|(name, _)| self.selects(tool, name))
            .any(|(_, nodes)| walk(nodes).any(|node| self.matches(node)))
    }

    fn selects(&self, tool: BuildTool, name: &str) -> bool {
        match tool {
            BuildTool::Maven => self.scope.as_ref().map_or(true, |scope| {
                scope.classpath_buckets().contains(&name.to_ascii_lowercase())
            }),
            BuildTool::Gradle => match (&self.configuration, &self.scope) {
                (Some(configuration), _) => configuration == name,
                (None, Some(scope)) => scope.gradle_classpaths().contains(&name),
                (None, None) => true,
            },
        }
    }

    fn matches(&self, node: &DependencyNode) -> bool {
        self.matcher.matches_resolved(&node.coordinate)
            && self
                .version
                .as_ref()
                .map_or(true, |version| &node.coordinate.version == version)
            && (!self.only_direct || node.depth == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{gradle_project, maven_project, node};
    use crate::dependency_analysis::domain::MavenProject;

    fn service() -> MavenProject {
        maven_project(
            "pom.xml",
            "service",
            vec![],
            vec![
                (
                    "compile",
                    vec![node(
                        "com.fasterxml.jackson.core:jackson-databind:2.17.0",
                        vec![node("com.fasterxml.jackson.core:jackson-core:2.17.0", vec![])],
                    )],
                ),
                ("test", vec![node("junit:junit:4.13.2", vec![])]),
            ],
        )
    }

    #[test]
    fn test_maven_scope_includes_broader_scopes() {
        let project = service();
        let core = |scope| {
            DependencyQuery::new("com.fasterxml.jackson.core", "jackson-core")
                .unwrap()
                .scope(scope)
                .unwrap()
                .found_in(&project)
        };
        assert!(core(None));
        assert!(core(Some("compile")));
        assert!(core(Some("test")));

        let junit = DependencyQuery::new("junit", "junit")
            .unwrap()
            .scope(Some("runtime"))
            .unwrap();
        assert!(!junit.found_in(&project));
    }

    #[test]
    fn test_only_direct_and_version() {
        let project = service();
        let core = DependencyQuery::new("com.fasterxml.jackson.core", "jackson-core").unwrap();
        assert!(!core.only_direct(true).found_in(&project));

        let databind = DependencyQuery::new("com.fasterxml.jackson.core", "jackson-databind")
            .unwrap()
            .version(Some("2.16.0"));
        assert!(!databind.found_in(&project));
        assert_eq!(databind.describe(), "com.fasterxml.jackson.core:jackson-databind:2.16.0");
    }

    #[test]
    fn test_gradle_configuration_and_scope() {
        let project = gradle_project(
            "build.gradle",
            "app",
            vec![],
            vec![
                ("compileClasspath", vec![node("org.slf4j:slf4j-api:2.0.9", vec![])]),
                ("testRuntimeClasspath", vec![node("junit:junit:4.13.2", vec![])]),
            ],
        );
        let junit = || DependencyQuery::new("junit", "*").unwrap();

        assert!(junit().found_in(&project));
        assert!(junit().scope(Some("test")).unwrap().found_in(&project));
        assert!(!junit().scope(Some("compile")).unwrap().found_in(&project));
        assert!(!junit()
            .configuration(Some("compileClasspath"))
            .found_in(&project));
    }

    #[test]
    fn test_invalid_scope_is_rejected() {
        assert!(DependencyQuery::new("junit", "*")
            .unwrap()
            .scope(Some("implementation"))
            .is_err());
    }
}
