use crate::shared::error::DepscopeError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for a single coordinate component (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// Version-independent identity of a dependency: `group:artifact`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    pub fn with_version(&self, version: impl Into<String>) -> ResolvedCoordinate {
        ResolvedCoordinate {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// A coordinate pinned to one version. Equality is structural over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolvedCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ResolvedCoordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.group.clone(), self.artifact.clone())
    }

    pub fn same_coordinate(&self, other: &Coordinate) -> bool {
        self.group == other.group && self.artifact == other.artifact
    }

    /// Package URL as used by CycloneDX and OSV.
    pub fn purl(&self) -> String {
        format!(
            "pkg:maven/{}/{}@{}",
            self.group, self.artifact, self.version
        )
    }
}

impl fmt::Display for ResolvedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for ResolvedCoordinate {
    type Err = anyhow::Error;

    /// Parses `group:artifact:version`.
    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.trim().split(':').collect();
        let valid = parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.len() <= MAX_COMPONENT_LENGTH && !p.contains(char::is_whitespace));
        if !valid {
            return Err(DepscopeError::InvalidCoordinate {
                value: value.to_string(),
            }
            .into());
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

/// A remote package repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: Option<String>,
    pub uri: String,
}

impl Repository {
    pub fn new(id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            uri: uri.into(),
        }
    }

    pub fn maven_central() -> Self {
        Self::new("central", MAVEN_CENTRAL_URI)
    }

    /// URI without trailing slashes, used to deduplicate repositories.
    pub fn normalized_uri(&self) -> &str {
        self.uri.trim_end_matches('/')
    }

    /// Whether this repository plausibly points at Maven Central.
    pub fn is_maven_central(&self) -> bool {
        CENTRAL_HOST_MARKERS
            .iter()
            .any(|marker| self.uri.contains(marker))
    }
}

pub const MAVEN_CENTRAL_URI: &str = "https://repo.maven.apache.org/maven2";

const CENTRAL_HOST_MARKERS: [&str; 2] = ["repo.maven.apache.org", "repo1.maven.org"];
