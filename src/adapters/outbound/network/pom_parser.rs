use crate::dependency_analysis::domain::{DependencyDeclaration, ResolvedCoordinate, Scope};
use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use tracing::debug;

/// Maximum number of nested `${...}` substitutions in one value
const MAX_INTERPOLATION_ROUNDS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RawDependency {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    optional: Option<String>,
}

/// The parts of a published POM that matter for transitive resolution.
///
/// Only the project-level `<dependencies>` section is read. Entries under
/// `<dependencyManagement>`, `<profiles>` and `<build>` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDocument {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    parent_group_id: Option<String>,
    parent_version: Option<String>,
    properties: HashMap<String, String>,
    dependencies: Vec<RawDependency>,
}

impl PomDocument {
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut buf = Vec::new();
        let mut path: Vec<String> = Vec::new();
        let mut pom = PomDocument::default();
        let mut current: Option<RawDependency> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    path.push(name);
                    if is_path(&path, &["project", "dependencies", "dependency"]) {
                        current = Some(RawDependency::default());
                    }
                }
                Ok(Event::End(_)) => {
                    if is_path(&path, &["project", "dependencies", "dependency"]) {
                        if let Some(dependency) = current.take() {
                            pom.dependencies.push(dependency);
                        }
                    }
                    path.pop();
                }
                Ok(Event::Text(t)) => {
                    let text = reader
                        .decoder()
                        .decode(t.as_ref())
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    if !text.is_empty() {
                        pom.accept_text(&path, text, current.as_mut());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => anyhow::bail!("Malformed POM at position {}: {}", reader.buffer_position(), e),
                _ => {}
            }
            buf.clear();
        }

        Ok(pom)
    }

    fn accept_text(&mut self, path: &[String], text: String, dependency: Option<&mut RawDependency>) {
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();
        match segments.as_slice() {
            ["project", "groupId"] => self.group_id = Some(text),
            ["project", "artifactId"] => self.artifact_id = Some(text),
            ["project", "version"] => self.version = Some(text),
            ["project", "parent", "groupId"] => self.parent_group_id = Some(text),
            ["project", "parent", "version"] => self.parent_version = Some(text),
            ["project", "properties", key] => {
                self.properties.insert(key.to_string(), text);
            }
            ["project", "dependencies", "dependency", field] => {
                if let Some(dependency) = dependency {
                    match *field {
                        "groupId" => dependency.group_id = Some(text),
                        "artifactId" => dependency.artifact_id = Some(text),
                        "version" => dependency.version = Some(text),
                        "scope" => dependency.scope = Some(text),
                        "optional" => dependency.optional = Some(text),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// Effective group id: own, else inherited from the parent.
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref().or(self.parent_group_id.as_deref())
    }

    /// Effective version: own, else inherited from the parent.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().or(self.parent_version.as_deref())
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let value = match key {
            "project.version" | "pom.version" | "version" => self.version(),
            "project.groupId" | "pom.groupId" | "groupId" => self.group_id(),
            "project.artifactId" | "pom.artifactId" | "artifactId" => self.artifact_id.as_deref(),
            "project.parent.version" | "parent.version" => self.parent_version.as_deref(),
            "project.parent.groupId" | "parent.groupId" => self.parent_group_id.as_deref(),
            other => self.properties.get(other).map(String::as_str),
        };
        value.map(str::to_string)
    }

    /// Replaces `${...}` references. Returns `None` when a reference stays unresolved.
    fn interpolate(&self, value: &str) -> Option<String> {
        let mut current = value.to_string();
        for _ in 0..MAX_INTERPOLATION_ROUNDS {
            let Some(start) = current.find("${") else {
                return Some(current);
            };
            let end = start + current[start..].find('}')?;
            let replacement = self.lookup(&current[start + 2..end])?;
            current.replace_range(start..=end, &replacement);
        }
        (!current.contains("${")).then_some(current)
    }

    /// Dependency declarations with every reference resolved.
    ///
    /// Entries without a version (managed by a BOM or parent) and entries with
    /// unresolvable references are skipped.
    pub fn declarations(&self) -> Vec<DependencyDeclaration> {
        self.dependencies
            .iter()
            .filter_map(|raw| {
                let resolved = self.declaration(raw);
                if resolved.is_none() {
                    debug!("Skipping unresolvable POM dependency {:?}", raw);
                }
                resolved
            })
            .collect()
    }

    fn declaration(&self, raw: &RawDependency) -> Option<DependencyDeclaration> {
        let group = self.interpolate(raw.group_id.as_deref()?)?;
        let artifact = self.interpolate(raw.artifact_id.as_deref()?)?;
        let version = self.interpolate(raw.version.as_deref()?)?;
        let mut declaration =
            DependencyDeclaration::new(ResolvedCoordinate::new(group, artifact, version));
        if let Some(scope) = raw.scope.as_deref().and_then(|s| self.interpolate(s)) {
            declaration = declaration.with_scope(Scope::parse(&scope));
        }
        let optional = raw
            .optional
            .as_deref()
            .and_then(|o| self.interpolate(o))
            .is_some_and(|o| o.eq_ignore_ascii_case("true"));
        if optional {
            declaration = declaration.optional();
        }
        Some(declaration)
    }
}

fn is_path(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}
