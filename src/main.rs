mod cli;
mod config;

use cli::{create_report_formatter, progress_message, Args, Command};
use config::{discover_config, load_config_from_path, ConfigFile};
use depscope::adapters::outbound::console::StderrProgressReporter;
use depscope::adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
use depscope::adapters::outbound::formatters::CycloneDxFormatter;
use depscope::adapters::outbound::network::{CachingMetadataFetcher, MavenRepositoryClient, OsvClient};
use depscope::adapters::outbound::report::InMemoryReportSink;
use depscope::application::dto::{PipelineOutcome, ReportFormat};
use depscope::application::services::ClosureResolver;
use depscope::application::use_cases::{
    ChangeDependencyUseCase, CheckVulnerabilitiesUseCase, DependencyInsightUseCase,
    DependencyLicenseCheckUseCase, DependencyListUseCase, DependencyResolutionDiagnosticUseCase,
    DoesNotIncludeDependencyUseCase, FindDependencyUseCase, FindMinimumDependencyVersionUseCase,
    FindRepositoryOrderUseCase, ModuleHasDependencyUseCase, RelocatedDependencyCheckUseCase,
    RemoveDependencyUseCase, RemoveRedundantDependenciesUseCase, SoftwareBillOfMaterialsUseCase,
    UpgradeDependencyVersionUseCase, DEFAULT_CHECK_COORDINATE,
};
use depscope::application::Pipeline;
use depscope::dependency_analysis::domain::{
    BuildDocument, Repository, VersionComparator, Workspace,
};
use depscope::dependency_analysis::policies::RelocationTable;
use depscope::ports::outbound::{OutputPresenter, ReportRow, WorkspaceReader};
use depscope::shared::error::{DepscopeError, ExitCode};
use depscope::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::filter::LevelFilter;

/// Default number of documents and artifacts processed concurrently
const DEFAULT_CONCURRENCY: usize = 4;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Settings after applying CLI flag > config file > built-in default.
#[derive(Debug)]
struct Settings {
    format: ReportFormat,
    concurrency: usize,
    config: ConfigFile,
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return load_config_from_path(path);
    }
    let dir = args
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok(discover_config(dir)?.unwrap_or_default())
}

fn resolve_settings(args: &Args, config: ConfigFile) -> Result<Settings> {
    let format = match (args.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(value)) => {
            value
                .parse::<ReportFormat>()
                .map_err(|reason| DepscopeError::InvalidConfig {
                    path: args
                        .config
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILENAME)),
                    reason,
                    hint: "Use 'json' or 'markdown'.".to_string(),
                })?
        }
        (None, None) => ReportFormat::default(),
    };

    if args.concurrency == Some(0) {
        anyhow::bail!("--concurrency must be at least 1");
    }
    let concurrency = args
        .concurrency
        .or(config.concurrency)
        .unwrap_or(DEFAULT_CONCURRENCY);

    Ok(Settings {
        format,
        concurrency,
        config,
    })
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = resolve_settings(&args, config)?;

    let documents = FileSystemReader::new().read_workspace(&args.input)?;
    eprintln!(
        "📖 Loaded {} document(s) from {}",
        documents.len(),
        args.input.display()
    );

    let pipeline = Pipeline::new(StderrProgressReporter::new())
        .with_scan_concurrency(settings.concurrency);
    let sink = InMemoryReportSink::new();
    let outcome = execute(&args.command, &settings, &pipeline, documents, &sink).await?;

    if outcome.scan_failures > 0 {
        eprintln!(
            "⚠️  Warning: {} document(s) could not be scanned",
            outcome.scan_failures
        );
    }

    if !args.check {
        present_snapshot(args.output.clone(), outcome.documents.clone())?;
    }

    let rows = sink.rows();
    present_report(args.report.clone(), settings.format, &rows)?;

    Ok(exit_code(&args, &outcome, &rows))
}

async fn execute(
    command: &Command,
    settings: &Settings,
    pipeline: &Pipeline<StderrProgressReporter>,
    documents: Vec<BuildDocument>,
    sink: &InMemoryReportSink,
) -> Result<PipelineOutcome> {
    let config = &settings.config;
    match command {
        Command::Redundant {
            group,
            artifact,
            scope,
            configuration,
        } => {
            let fetcher = CachingMetadataFetcher::new(MavenRepositoryClient::new()?);
            let mut resolver = ClosureResolver::new(fetcher)
                .with_concurrency(settings.concurrency)
                .with_extra_repositories(config.repositories.clone().unwrap_or_default());
            if let Some(uri) = &config.default_repository {
                resolver = resolver.with_default_repository(Repository::new("default", uri.clone()));
            }
            let analysis = RemoveRedundantDependenciesUseCase::new(resolver, group, artifact)
                .with_scope(scope.clone())
                .with_configuration(configuration.clone());
            pipeline.run(&analysis, documents, sink).await
        }
        Command::MinVersion { group, artifact } => {
            let analysis =
                FindMinimumDependencyVersionUseCase::new(VersionComparator::new(), group, artifact);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Insight { group, artifact } => {
            let analysis = DependencyInsightUseCase::new(group, artifact);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Upgrade {
            group,
            artifact,
            new_version,
        } => {
            let analysis = UpgradeDependencyVersionUseCase::new(
                VersionComparator::new(),
                group,
                artifact,
                new_version,
            );
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Relocated => {
            let table = RelocationTable::builtin()
                .with_relocations(config.relocations.clone().unwrap_or_default());
            let analysis = RelocatedDependencyCheckUseCase::new(table);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Diagnose { check_coordinate } => {
            let coordinate = check_coordinate
                .clone()
                .or_else(|| config.check_coordinate.clone())
                .unwrap_or_else(|| DEFAULT_CHECK_COORDINATE.to_string());
            let analysis = DependencyResolutionDiagnosticUseCase::new(MavenRepositoryClient::new()?)
                .with_check_coordinate(coordinate);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::List { scope, transitive } => {
            let analysis = DependencyListUseCase::new(*scope, *transitive);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Sbom => {
            let analysis = SoftwareBillOfMaterialsUseCase::new(CycloneDxFormatter::new());
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Vulns { .. } => {
            let analysis = CheckVulnerabilitiesUseCase::new(OsvClient::new()?);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Licenses { scope } => {
            let analysis = DependencyLicenseCheckUseCase::new(scope);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Remove {
            group,
            artifact,
            scope,
            configuration,
        } => {
            let analysis = RemoveDependencyUseCase::new(group, artifact)
                .with_scope(scope.clone())
                .with_configuration(configuration.clone());
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Change {
            group,
            artifact,
            new_group,
            new_artifact,
            new_version,
            override_managed_version,
        } => {
            let analysis = ChangeDependencyUseCase::new(group, artifact)
                .with_new_group(new_group.clone())
                .with_new_artifact(new_artifact.clone())
                .with_new_version(new_version.clone())
                .override_managed_version(*override_managed_version);
            pipeline.run(&analysis, documents, sink).await
        }
        Command::Find {
            group,
            artifact,
            version,
            configuration,
        } => {
            let analysis = FindDependencyUseCase::new(group, artifact)
                .with_version(version.clone())
                .with_configuration(configuration.clone());
            pipeline.run(&analysis, documents, sink).await
        }
        Command::ModuleHas {
            group,
            artifact,
            scope,
            version,
        } => {
            let analysis = ModuleHasDependencyUseCase::new(group, artifact)
                .with_scope(scope.clone())
                .with_version(version.clone());
            pipeline.run(&analysis, documents, sink).await
        }
        Command::DoesNotInclude {
            group,
            artifact,
            version,
            only_direct,
            scope,
            configuration,
        } => {
            let analysis = DoesNotIncludeDependencyUseCase::new(group, artifact)
                .with_version(version.clone())
                .only_direct(*only_direct)
                .with_scope(scope.clone())
                .with_configuration(configuration.clone());
            pipeline.run(&analysis, documents, sink).await
        }
        Command::RepositoryOrder => {
            pipeline.run(&FindRepositoryOrderUseCase::new(), documents, sink).await
        }
    }
}

fn present_snapshot(output: Option<PathBuf>, documents: Vec<BuildDocument>) -> Result<()> {
    let snapshot = serde_json::to_string_pretty(&Workspace { documents })?;
    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&snapshot)
}

fn present_report(report: Option<PathBuf>, format: ReportFormat, rows: &[ReportRow]) -> Result<()> {
    eprintln!("{}", progress_message(format));
    let rendered = create_report_formatter(format).format(rows)?;
    match report {
        Some(path) => FileSystemWriter::new(path).present(&rendered),
        None => {
            eprintln!("{}", rendered);
            Ok(())
        }
    }
}

fn exit_code(args: &Args, outcome: &PipelineOutcome, rows: &[ReportRow]) -> ExitCode {
    let pending_changes = args.check && outcome.has_changes();
    let vulnerable = matches!(
        args.command,
        Command::Vulns {
            fail_on_findings: true
        }
    ) && rows
        .iter()
        .any(|row| matches!(row, ReportRow::Vulnerability { .. }));

    if pending_changes || vulnerable {
        ExitCode::FindingsDetected
    } else {
        ExitCode::Success
    }
}
