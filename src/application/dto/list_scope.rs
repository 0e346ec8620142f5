/// Which classpath the dependency list describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    #[default]
    Compile,
    Runtime,
    TestRuntime,
}

impl ListScope {
    /// Key of the resolved tree in a Maven project.
    pub fn maven_scope(self) -> &'static str {
        match self {
            ListScope::Compile => "compile",
            ListScope::Runtime => "runtime",
            ListScope::TestRuntime => "test",
        }
    }

    /// Name of the resolvable Gradle configuration.
    pub fn gradle_configuration(self) -> &'static str {
        match self {
            ListScope::Compile => "compileClasspath",
            ListScope::Runtime => "runtimeClasspath",
            ListScope::TestRuntime => "testRuntimeClasspath",
        }
    }
}

impl std::str::FromStr for ListScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compile" => Ok(ListScope::Compile),
            "runtime" => Ok(ListScope::Runtime),
            "test-runtime" | "test_runtime" | "test" => Ok(ListScope::TestRuntime),
            _ => Err(format!(
                "Invalid scope: {}. Please specify 'compile', 'runtime' or 'test-runtime'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ListScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListScope::Compile => write!(f, "compile"),
            ListScope::Runtime => write!(f, "runtime"),
            ListScope::TestRuntime => write!(f, "test-runtime"),
        }
    }
}
