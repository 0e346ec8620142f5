use clap::{Parser, Subcommand};
use std::path::PathBuf;

use depscope::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use depscope::application::dto::{ListScope, ReportFormat};
use depscope::ports::outbound::ReportFormatter;

/// Default workspace snapshot file name
pub const DEFAULT_INPUT: &str = "depscope-workspace.json";

/// Creates a formatter instance for the report format
pub fn create_report_formatter(format: ReportFormat) -> Box<dyn ReportFormatter> {
    match format {
        ReportFormat::Json => Box::new(JsonFormatter::new()),
        ReportFormat::Markdown => Box::new(MarkdownFormatter::new()),
    }
}

/// Returns the progress message for the report format
pub fn progress_message(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Json => "📝 Generating JSON report...",
        ReportFormat::Markdown => "📝 Generating Markdown report...",
    }
}

/// Whole-project dependency analysis for Maven and Gradle builds
#[derive(Parser, Debug)]
#[command(name = "depscope")]
#[command(version)]
#[command(
    about = "Whole-project dependency analysis for Maven and Gradle builds",
    long_about = None
)]
pub struct Args {
    /// Workspace snapshot to analyze (JSON)
    #[arg(short, long, global = true, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the rewritten snapshot (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Where to write the report (if not specified, prints it to stderr)
    #[arg(short, long, global = true)]
    pub report: Option<PathBuf>,

    /// Report format: json or markdown
    #[arg(short, long, global = true)]
    pub format: Option<ReportFormat>,

    /// Path to a config file (defaults to depscope.config.yml next to the snapshot)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of documents and artifacts processed concurrently
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Do not write the snapshot; exit with 1 when it would change
    #[arg(long, global = true)]
    pub check: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove direct dependencies already brought in by a parent dependency
    Redundant {
        /// Group pattern of the parent dependency (supports wildcards: *)
        #[arg(short, long)]
        group: String,
        /// Artifact pattern of the parent dependency (supports wildcards: *)
        #[arg(short, long)]
        artifact: String,
        /// Only remove Maven dependencies in this scope (compile, runtime, provided, test)
        #[arg(long)]
        scope: Option<String>,
        /// Only remove Gradle declarations in this configuration
        #[arg(long)]
        configuration: Option<String>,
    },
    /// Find the lowest version of a dependency used anywhere in the workspace
    MinVersion {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
    },
    /// Show every resolved occurrence of a dependency
    Insight {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
    },
    /// Upgrade declared versions of a dependency (never downgrades)
    Upgrade {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
        /// Version to upgrade to
        #[arg(long = "to", value_name = "VERSION")]
        new_version: String,
    },
    /// Find dependencies that have moved to new coordinates
    Relocated,
    /// Check that every repository is reachable and serves artifacts
    Diagnose {
        /// Artifact downloaded from each repository (group:artifact:version)
        #[arg(long)]
        check_coordinate: Option<String>,
    },
    /// List the dependencies of every project
    List {
        /// compile, runtime or test-runtime
        #[arg(long, default_value = "compile")]
        scope: ListScope,
        /// Include transitive dependencies
        #[arg(long)]
        transitive: bool,
    },
    /// Keep a CycloneDX SBOM next to every project
    Sbom,
    /// Report known vulnerabilities in resolved dependencies
    Vulns {
        /// Exit with 1 when any vulnerability is found
        #[arg(long)]
        fail_on_findings: bool,
    },
    /// Report the declared licenses of resolved dependencies
    Licenses {
        /// Maven scope to inspect (compile, runtime, provided, test)
        #[arg(long, default_value = "compile")]
        scope: String,
    },
    /// Remove declarations of a dependency
    Remove {
        #[arg(short, long)]
        group: String,
        #[arg(short, long)]
        artifact: String,
        /// Maven scope whose set the dependency is removed from
        #[arg(long)]
        scope: Option<String>,
        /// Only remove Gradle declarations in this configuration
        #[arg(long)]
        configuration: Option<String>,
    },
    /// Change the coordinates of declared dependencies
    Change {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
        #[arg(long)]
        new_group: Option<String>,
        #[arg(long)]
        new_artifact: Option<String>,
        #[arg(long)]
        new_version: Option<String>,
        /// Also pin a version on declarations that inherit a managed one
        #[arg(long)]
        override_managed_version: bool,
    },
    /// Mark direct declarations of a dependency
    Find {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
        #[arg(long)]
        version: Option<String>,
        /// Gradle configuration to search
        #[arg(long)]
        configuration: Option<String>,
    },
    /// Mark every build file of the modules that resolve a dependency
    ModuleHas {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        version: Option<String>,
    },
    /// Mark projects that do not resolve a dependency
    DoesNotInclude {
        #[arg(short, long)]
        group: String,
        #[arg(short, long, default_value = "*")]
        artifact: String,
        #[arg(long)]
        version: Option<String>,
        /// Only direct dependencies count
        #[arg(long)]
        only_direct: bool,
        #[arg(long)]
        scope: Option<String>,
        /// Gradle configuration to search (takes precedence over --scope)
        #[arg(long)]
        configuration: Option<String>,
    },
    /// Report the order in which repositories are consulted
    RepositoryOrder,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_redundant_with_global_options() {
        let args = Args::try_parse_from([
            "depscope",
            "redundant",
            "-g",
            "com.fasterxml.jackson.core",
            "-a",
            "jackson-databind",
            "--scope",
            "compile",
            "--check",
            "-f",
            "md",
        ])
        .unwrap();

        assert!(args.check);
        assert_eq!(args.format, Some(ReportFormat::Markdown));
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        match args.command {
            Command::Redundant { group, scope, .. } => {
                assert_eq!(group, "com.fasterxml.jackson.core");
                assert_eq!(scope.as_deref(), Some("compile"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_artifact_pattern_defaults_to_wildcard() {
        let args = Args::try_parse_from(["depscope", "insight", "-g", "org.slf4j"]).unwrap();
        match args.command {
            Command::Insight { artifact, .. } => assert_eq!(artifact, "*"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_list_scope_parsing() {
        let args =
            Args::try_parse_from(["depscope", "list", "--scope", "test-runtime", "--transitive"])
                .unwrap();
        match args.command {
            Command::List { scope, transitive } => {
                assert_eq!(scope, ListScope::TestRuntime);
                assert!(transitive);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_change_targets() {
        let args = Args::try_parse_from([
            "depscope",
            "change",
            "-g",
            "javax.activation",
            "--new-group",
            "jakarta.activation",
            "--override-managed-version",
        ])
        .unwrap();
        match args.command {
            Command::Change {
                artifact,
                new_group,
                new_version,
                override_managed_version,
                ..
            } => {
                assert_eq!(artifact, "*");
                assert_eq!(new_group.as_deref(), Some("jakarta.activation"));
                assert_eq!(new_version, None);
                assert!(override_managed_version);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_commands() {
        let args = Args::try_parse_from([
            "depscope",
            "does-not-include",
            "-g",
            "org.assertj",
            "--only-direct",
            "--configuration",
            "testRuntimeClasspath",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::DoesNotInclude { only_direct: true, configuration: Some(_), .. }
        ));

        let args = Args::try_parse_from(["depscope", "licenses"]).unwrap();
        assert!(matches!(args.command, Command::Licenses { scope } if scope == "compile"));

        let args = Args::try_parse_from(["depscope", "repository-order"]).unwrap();
        assert!(matches!(args.command, Command::RepositoryOrder));

        assert!(Args::try_parse_from(["depscope", "remove", "-g", "junit"]).is_err());
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from(["depscope", "sbom", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["depscope"]).is_err());
    }

    #[test]
    fn test_report_formatter_selection() {
        let json = create_report_formatter(ReportFormat::Json).format(&[]).unwrap();
        assert_eq!(json, "[]");
        let markdown = create_report_formatter(ReportFormat::Markdown)
            .format(&[])
            .unwrap();
        assert!(markdown.starts_with("# Dependency Report"));
        assert!(progress_message(ReportFormat::Markdown).contains("Markdown"));
    }
}
