use crate::dependency_analysis::domain::Coordinate;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A coordinate that has moved to a new group and/or artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    pub old_group: String,
    /// Absent for group-wide relocations.
    #[serde(default)]
    pub old_artifact: Option<String>,
    pub new_group: String,
    /// Absent when the artifact id is unchanged.
    #[serde(default)]
    pub new_artifact: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl Relocation {
    pub fn new(
        old_group: &str,
        old_artifact: Option<&str>,
        new_group: &str,
        new_artifact: Option<&str>,
        context: Option<&str>,
    ) -> Self {
        Self {
            old_group: old_group.to_string(),
            old_artifact: old_artifact.map(str::to_string),
            new_group: new_group.to_string(),
            new_artifact: new_artifact.map(str::to_string),
            context: context.map(str::to_string),
        }
    }

    /// Where `artifact` lives now.
    pub fn target(&self, artifact: &str) -> Coordinate {
        Coordinate::new(
            self.new_group.clone(),
            self.new_artifact.clone().unwrap_or_else(|| artifact.to_string()),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.old_group.trim().is_empty() || self.new_group.trim().is_empty() {
            anyhow::bail!("relocation groups cannot be empty");
        }
        Ok(())
    }
}

/// Lookup of relocated coordinates. An exact `group:artifact` entry takes
/// precedence over a group-wide entry.
#[derive(Debug, Clone, Default)]
pub struct RelocationTable {
    by_artifact: HashMap<Coordinate, Relocation>,
    by_group: HashMap<String, Relocation>,
}

impl RelocationTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Well-known relocations on Maven Central.
    pub fn builtin() -> Self {
        Self::empty().with_relocations(vec![
            Relocation::new(
                "javax.xml.bind",
                Some("jaxb-api"),
                "jakarta.xml.bind",
                Some("jakarta.xml.bind-api"),
                Some("Jakarta EE 9 moved JAXB to the jakarta namespace"),
            ),
            Relocation::new(
                "javax.activation",
                Some("activation"),
                "jakarta.activation",
                Some("jakarta.activation-api"),
                Some("Jakarta EE 9 moved JAF to the jakarta namespace"),
            ),
            Relocation::new(
                "mysql",
                Some("mysql-connector-java"),
                "com.mysql",
                Some("mysql-connector-j"),
                None,
            ),
            Relocation::new(
                "org.hibernate",
                Some("hibernate-validator"),
                "org.hibernate.validator",
                None,
                None,
            ),
            Relocation::new(
                "org.codehaus.jackson",
                None,
                "com.fasterxml.jackson.core",
                None,
                Some("Jackson 1.x is no longer maintained"),
            ),
            Relocation::new("net.sf.ehcache", None, "org.ehcache", None, None),
            Relocation::new(
                "log4j",
                Some("log4j"),
                "org.apache.logging.log4j",
                Some("log4j-1.2-api"),
                Some("Log4j 1.x reached end of life"),
            ),
            Relocation::new(
                "org.mockito",
                Some("mockito-all"),
                "org.mockito",
                Some("mockito-core"),
                None,
            ),
            Relocation::new(
                "com.google.code.findbugs",
                Some("annotations"),
                "com.github.spotbugs",
                Some("spotbugs-annotations"),
                None,
            ),
        ])
    }

    /// Adds entries, replacing existing entries with the same key.
    pub fn with_relocations(mut self, relocations: Vec<Relocation>) -> Self {
        for relocation in relocations {
            match relocation.old_artifact.clone() {
                Some(artifact) => {
                    let key = Coordinate::new(relocation.old_group.clone(), artifact);
                    self.by_artifact.insert(key, relocation);
                }
                None => {
                    self.by_group.insert(relocation.old_group.clone(), relocation);
                }
            }
        }
        self
    }

    pub fn lookup(&self, coordinate: &Coordinate) -> Option<&Relocation> {
        self.by_artifact
            .get(coordinate)
            .or_else(|| self.by_group.get(&coordinate.group))
    }

    pub fn len(&self) -> usize {
        self.by_artifact.len() + self.by_group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entry_wins_over_group() {
        let table = RelocationTable::empty().with_relocations(vec![
            Relocation::new("old", None, "new", None, None),
            Relocation::new("old", Some("special"), "elsewhere", Some("moved"), None),
        ]);

        let special = table.lookup(&Coordinate::new("old", "special")).unwrap();
        assert_eq!(special.target("special"), Coordinate::new("elsewhere", "moved"));

        let other = table.lookup(&Coordinate::new("old", "other")).unwrap();
        assert_eq!(other.target("other"), Coordinate::new("new", "other"));
    }

    #[test]
    fn test_builtin_knows_jackson_1() {
        let table = RelocationTable::builtin();
        let relocation = table
            .lookup(&Coordinate::new("org.codehaus.jackson", "jackson-mapper-asl"))
            .unwrap();
        assert_eq!(relocation.new_group, "com.fasterxml.jackson.core");
        assert!(table.lookup(&Coordinate::new("com.fasterxml.jackson.core", "jackson-core")).is_none());
    }

    #[test]
    fn test_later_entries_override() {
        let table = RelocationTable::builtin().with_relocations(vec![Relocation::new(
            "mysql",
            Some("mysql-connector-java"),
            "org.mariadb.jdbc",
            Some("mariadb-java-client"),
            Some("internal policy"),
        )]);
        let relocation = table
            .lookup(&Coordinate::new("mysql", "mysql-connector-java"))
            .unwrap();
        assert_eq!(relocation.new_group, "org.mariadb.jdbc");
        assert_eq!(relocation.context.as_deref(), Some("internal policy"));
    }

    #[test]
    fn test_validate_rejects_empty_groups() {
        assert!(Relocation::new(" ", None, "new", None, None).validate().is_err());
        assert!(Relocation::new("old", None, "new", None, None).validate().is_ok());
    }
}
