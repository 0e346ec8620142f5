use serde::Serialize;

/// One structured report row. Each variant is a separate table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "table", rename_all = "snake_case")]
pub enum ReportRow {
    RedundantDependency {
        project: String,
        scope: String,
        group: String,
        artifact: String,
        version: String,
    },
    DependencyInUse {
        project: String,
        scope: String,
        group: String,
        artifact: String,
        version: String,
        depth: u32,
    },
    VersionUpgrade {
        project: String,
        group: String,
        artifact: String,
        from: String,
        to: String,
    },
    RelocatedDependency {
        group: String,
        artifact: String,
        relocated_group: String,
        relocated_artifact: String,
        context: Option<String>,
    },
    RepositoryAccessibility {
        uri: String,
        ping_error_type: Option<String>,
        ping_error_message: Option<String>,
        ping_http_code: Option<u16>,
        resolve_error_type: Option<String>,
        resolve_error_message: Option<String>,
    },
    GradleConfigurationError {
        project_path: String,
        configuration: String,
        exception_type: String,
        message: Option<String>,
    },
    DependencyListEntry {
        build_tool: String,
        group: String,
        artifact: String,
        version: String,
        dependency_group: String,
        dependency_artifact: String,
        dependency_version: String,
        direct: bool,
    },
    Vulnerability {
        group: String,
        artifact: String,
        version: String,
        id: String,
        summary: Option<String>,
        severity: Option<String>,
        depth: u32,
    },
    License {
        group: String,
        artifact: String,
        version: String,
        license_name: String,
        license_type: String,
    },
    RemovedDependency {
        project: String,
        scope: String,
        group: String,
        artifact: String,
        version: Option<String>,
    },
    /// A declaration rewritten to new coordinates, both as `group:artifact[:version]`.
    ChangedDependency {
        project: String,
        from: String,
        to: String,
    },
    RepositoryOrder {
        project: String,
        rank: usize,
        id: String,
        uri: String,
    },
}

impl ReportRow {
    pub fn table(&self) -> &'static str {
        match self {
            ReportRow::RedundantDependency { .. } => "Redundant dependencies",
            ReportRow::DependencyInUse { .. } => "Dependencies in use",
            ReportRow::VersionUpgrade { .. } => "Version upgrades",
            ReportRow::RelocatedDependency { .. } => "Relocated dependencies",
            ReportRow::RepositoryAccessibility { .. } => "Repository accessibility",
            ReportRow::GradleConfigurationError { .. } => "Gradle configuration errors",
            ReportRow::DependencyListEntry { .. } => "Dependency list",
            ReportRow::Vulnerability { .. } => "Vulnerabilities",
            ReportRow::License { .. } => "Licenses",
            ReportRow::RemovedDependency { .. } => "Removed dependencies",
            ReportRow::ChangedDependency { .. } => "Changed dependencies",
            ReportRow::RepositoryOrder { .. } => "Repository order",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            ReportRow::RedundantDependency { .. } => {
                &["Project", "Scope", "Group", "Artifact", "Version"]
            }
            ReportRow::DependencyInUse { .. } => {
                &["Project", "Scope", "Group", "Artifact", "Version", "Depth"]
            }
            ReportRow::VersionUpgrade { .. } => &["Project", "Group", "Artifact", "From", "To"],
            ReportRow::RelocatedDependency { .. } => &[
                "Group",
                "Artifact",
                "Relocated group",
                "Relocated artifact",
                "Context",
            ],
            ReportRow::RepositoryAccessibility { .. } => &[
                "Repository",
                "Ping error type",
                "Ping error",
                "Ping HTTP code",
                "Resolve error type",
                "Resolve error",
            ],
            ReportRow::GradleConfigurationError { .. } => {
                &["Project", "Configuration", "Exception", "Message"]
            }
            ReportRow::DependencyListEntry { .. } => &[
                "Build tool",
                "Group",
                "Artifact",
                "Version",
                "Dependency group",
                "Dependency artifact",
                "Dependency version",
                "Direct",
            ],
            ReportRow::Vulnerability { .. } => &[
                "Group", "Artifact", "Version", "Id", "Summary", "Severity", "Depth",
            ],
            ReportRow::License { .. } => {
                &["Group", "Artifact", "Version", "License name", "License type"]
            }
            ReportRow::RemovedDependency { .. } => {
                &["Project", "Scope", "Group", "Artifact", "Version"]
            }
            ReportRow::ChangedDependency { .. } => &["Project", "From", "To"],
            ReportRow::RepositoryOrder { .. } => &["Project", "Rank", "Id", "Repository"],
        }
    }

    pub fn cells(&self) -> Vec<String> {
        fn opt(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }
        match self {
            ReportRow::RedundantDependency {
                project,
                scope,
                group,
                artifact,
                version,
            } => vec![
                project.clone(),
                scope.clone(),
                group.clone(),
                artifact.clone(),
                version.clone(),
            ],
            ReportRow::DependencyInUse {
                project,
                scope,
                group,
                artifact,
                version,
                depth,
            } => vec![
                project.clone(),
                scope.clone(),
                group.clone(),
                artifact.clone(),
                version.clone(),
                depth.to_string(),
            ],
            ReportRow::VersionUpgrade {
                project,
                group,
                artifact,
                from,
                to,
            } => vec![
                project.clone(),
                group.clone(),
                artifact.clone(),
                from.clone(),
                to.clone(),
            ],
            ReportRow::RelocatedDependency {
                group,
                artifact,
                relocated_group,
                relocated_artifact,
                context,
            } => vec![
                group.clone(),
                artifact.clone(),
                relocated_group.clone(),
                relocated_artifact.clone(),
                opt(context),
            ],
            ReportRow::RepositoryAccessibility {
                uri,
                ping_error_type,
                ping_error_message,
                ping_http_code,
                resolve_error_type,
                resolve_error_message,
            } => vec![
                uri.clone(),
                opt(ping_error_type),
                opt(ping_error_message),
                ping_http_code.map(|c| c.to_string()).unwrap_or_default(),
                opt(resolve_error_type),
                opt(resolve_error_message),
            ],
            ReportRow::GradleConfigurationError {
                project_path,
                configuration,
                exception_type,
                message,
            } => vec![
                project_path.clone(),
                configuration.clone(),
                exception_type.clone(),
                opt(message),
            ],
            ReportRow::DependencyListEntry {
                build_tool,
                group,
                artifact,
                version,
                dependency_group,
                dependency_artifact,
                dependency_version,
                direct,
            } => vec![
                build_tool.clone(),
                group.clone(),
                artifact.clone(),
                version.clone(),
                dependency_group.clone(),
                dependency_artifact.clone(),
                dependency_version.clone(),
                direct.to_string(),
            ],
            ReportRow::Vulnerability {
                group,
                artifact,
                version,
                id,
                summary,
                severity,
                depth,
            } => vec![
                group.clone(),
                artifact.clone(),
                version.clone(),
                id.clone(),
                opt(summary),
                opt(severity),
                depth.to_string(),
            ],
            ReportRow::License {
                group,
                artifact,
                version,
                license_name,
                license_type,
            } => vec![
                group.clone(),
                artifact.clone(),
                version.clone(),
                license_name.clone(),
                license_type.clone(),
            ],
            ReportRow::RemovedDependency {
                project,
                scope,
                group,
                artifact,
                version,
            } => vec![
                project.clone(),
                scope.clone(),
                group.clone(),
                artifact.clone(),
                opt(version),
            ],
            ReportRow::ChangedDependency { project, from, to } => {
                vec![project.clone(), from.clone(), to.clone()]
            }
            ReportRow::RepositoryOrder {
                project,
                rank,
                id,
                uri,
            } => vec![project.clone(), rank.to_string(), id.clone(), uri.clone()],
        }
    }
}

/// ReportSink port receiving one row per decision
///
/// Sinks are shared by every phase of a run, so insertion takes `&self`.
pub trait ReportSink: Send + Sync {
    fn insert_row(&self, row: ReportRow);
}
