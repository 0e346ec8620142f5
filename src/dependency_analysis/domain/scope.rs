use crate::shared::error::DepscopeError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency scope (Maven) or configuration (Gradle).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    Compile,
    Runtime,
    Provided,
    Test,
    System,
    /// Any other build-tool configuration, kept verbatim (e.g. `testRuntimeClasspath`).
    Configuration(String),
}

/// Scopes accepted on the command line and in config files.
pub const SELECTABLE_SCOPES: [&str; 4] = ["compile", "runtime", "provided", "test"];

const NONE: &[Scope] = &[];
const RUNTIME_BROADER: &[Scope] = &[Scope::Compile];
const PROVIDED_BROADER: &[Scope] = &[Scope::Compile, Scope::Runtime];
const TEST_BROADER: &[Scope] = &[Scope::Compile, Scope::Runtime, Scope::Provided];

impl Scope {
    /// Lenient parse for document data: known Maven scope names are matched
    /// case-insensitively, anything else becomes a named configuration.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "compile" => Scope::Compile,
            "runtime" => Scope::Runtime,
            "provided" => Scope::Provided,
            "test" => Scope::Test,
            "system" => Scope::System,
            _ => Scope::Configuration(name.to_string()),
        }
    }

    /// Strict parse for user input. Only scopes that take part in the lattice are valid.
    pub fn parse_selectable(name: &str) -> Result<Self> {
        match Self::parse(name.trim()) {
            scope @ (Scope::Compile | Scope::Runtime | Scope::Provided | Scope::Test) => Ok(scope),
            _ => Err(DepscopeError::InvalidScope {
                scope: name.to_string(),
                valid: SELECTABLE_SCOPES.join(", "),
            }
            .into()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Provided => "provided",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Configuration(name) => name,
        }
    }

    /// Accumulator bucket key: the lowercase scope name.
    pub fn bucket(&self) -> String {
        self.name().to_ascii_lowercase()
    }

    /// Scopes whose dependency sets are guaranteed supersets of this scope's set.
    ///
    /// `runtime → {compile}`, `provided → {compile, runtime}`,
    /// `test → {compile, runtime, provided}`, everything else → `{}`.
    pub fn broader_scopes(&self) -> &'static [Scope] {
        match self {
            Scope::Runtime => RUNTIME_BROADER,
            Scope::Provided => PROVIDED_BROADER,
            Scope::Test => TEST_BROADER,
            Scope::Compile | Scope::System | Scope::Configuration(_) => NONE,
        }
    }

    /// Reflexive partial order: holds when `self` is `other` or one of `other`'s
    /// broader scopes.
    pub fn broader_than(&self, other: &Scope) -> bool {
        self == other || other.broader_scopes().contains(self)
    }

    /// Whether this scope participates in transitive resolution of a consumer.
    pub fn is_transitive(&self) -> bool {
        matches!(self, Scope::Compile | Scope::Runtime)
    }

    /// Buckets of this scope and of every broader scope, i.e. the Maven
    /// resolved trees that make up this scope's classpath.
    pub fn classpath_buckets(&self) -> Vec<String> {
        std::iter::once(self)
            .chain(self.broader_scopes())
            .map(Scope::bucket)
            .collect()
    }

    /// Gradle configurations resolved for the classpath of a Maven scope.
    pub fn gradle_classpaths(&self) -> &'static [&'static str] {
        match self {
            Scope::Compile | Scope::Provided => &["compileClasspath"],
            Scope::Runtime => &["runtimeClasspath"],
            Scope::Test => &["testCompileClasspath", "testRuntimeClasspath"],
            Scope::System | Scope::Configuration(_) => &[],
        }
    }
}

impl From<String> for Scope {
    fn from(name: String) -> Self {
        Scope::parse(&name)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.name().to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
