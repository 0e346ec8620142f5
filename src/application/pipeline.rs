use crate::application::dto::PipelineOutcome;
use crate::dependency_analysis::domain::{BuildDocument, Merge};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ProgressReporter, ReportSink};
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

/// Default number of documents scanned concurrently
const DEFAULT_SCAN_CONCURRENCY: usize = 4;

/// Pipeline - drives an analysis through scan, generate and rewrite
///
/// The phases run strictly in order. Scan results are folded with the
/// analysis' merge operation as they complete, so the order in which
/// documents finish scanning does not affect the accumulator. Rewrite only
/// starts after every document has been scanned and sees the accumulator
/// through a shared reference.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct Pipeline<PR> {
    progress_reporter: PR,
    scan_concurrency: usize,
}

impl<PR: ProgressReporter> Pipeline<PR> {
    pub fn new(progress_reporter: PR) -> Self {
        Self {
            progress_reporter,
            scan_concurrency: DEFAULT_SCAN_CONCURRENCY,
        }
    }

    pub fn with_scan_concurrency(mut self, concurrency: usize) -> Self {
        self.scan_concurrency = concurrency.max(1);
        self
    }

    /// Runs `analysis` over `documents`.
    ///
    /// # Errors
    /// Only option validation fails the run, and it does so before scanning.
    /// Per-document scan failures are reported and counted in the outcome.
    pub async fn run<A: ScanningAnalysis>(
        &self,
        analysis: &A,
        documents: Vec<BuildDocument>,
        sink: &dyn ReportSink,
    ) -> Result<PipelineOutcome> {
        analysis.validate()?;

        // Phase 1: scan
        let (accumulator, scan_failures) = self.scan_phase(analysis, &documents).await;

        // Phase 2: generate
        let generated = self
            .generate_phase(analysis, &accumulator, &documents, sink)
            .await;

        // Phase 3: rewrite
        Ok(self.rewrite_phase(analysis, &accumulator, documents, generated, sink, scan_failures))
    }

    async fn scan_phase<A: ScanningAnalysis>(
        &self,
        analysis: &A,
        documents: &[BuildDocument],
    ) -> (A::Accumulator, usize) {
        self.progress_reporter.report(&format!(
            "🔍 Scanning {} document(s) for {}...",
            documents.len(),
            analysis.name()
        ));

        let total = documents.len();
        let mut accumulator = analysis.initial_value();
        let mut failures = 0;
        let mut completed = 0;

        let mut scans = stream::iter(documents)
            .map(|document| async move { (document.path(), scan_document(analysis, document).await) })
            .buffer_unordered(self.scan_concurrency);

        while let Some((path, result)) = scans.next().await {
            completed += 1;
            match result {
                Ok(partial) => accumulator.merge(partial),
                Err(e) => {
                    failures += 1;
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Skipping {} during scan: {:#}",
                        path.display(),
                        e
                    ));
                }
            }
            self.progress_reporter.report_progress(
                completed,
                total,
                Some(&path.display().to_string()),
            );
        }

        (accumulator, failures)
    }

    async fn generate_phase<A: ScanningAnalysis>(
        &self,
        analysis: &A,
        accumulator: &A::Accumulator,
        documents: &[BuildDocument],
        sink: &dyn ReportSink,
    ) -> Vec<BuildDocument> {
        let existing: HashSet<PathBuf> = documents.iter().map(|d| d.path().to_path_buf()).collect();
        let mut seen = HashSet::new();

        let generated: Vec<BuildDocument> = analysis
            .generate(accumulator, documents, sink)
            .await
            .into_iter()
            .filter(|document| {
                let path = document.path().to_path_buf();
                if existing.contains(&path) || !seen.insert(path.clone()) {
                    warn!("Ignoring generated document that would replace {}", path.display());
                    return false;
                }
                true
            })
            .collect();

        if !generated.is_empty() {
            self.progress_reporter.report(&format!(
                "📝 Generated {} new document(s)",
                generated.len()
            ));
        }
        generated
    }

    fn rewrite_phase<A: ScanningAnalysis>(
        &self,
        analysis: &A,
        accumulator: &A::Accumulator,
        documents: Vec<BuildDocument>,
        generated: Vec<BuildDocument>,
        sink: &dyn ReportSink,
        scan_failures: usize,
    ) -> PipelineOutcome {
        let generated_paths: Vec<PathBuf> =
            generated.iter().map(|d| d.path().to_path_buf()).collect();
        let input_count = documents.len();
        let mut changed = Vec::new();
        let mut rewritten_documents = Vec::with_capacity(input_count + generated.len());

        for (index, original) in documents.into_iter().chain(generated).enumerate() {
            let mut rewritten = original.clone();
            match &mut rewritten {
                BuildDocument::Maven(project) => analysis.rewrite_maven(project, accumulator, sink),
                BuildDocument::Gradle(project) => analysis.rewrite_gradle(project, accumulator, sink),
                BuildDocument::Plain(document) => analysis.rewrite_plain(document, accumulator, sink),
            }
            if index < input_count && rewritten != original {
                changed.push(rewritten.path().to_path_buf());
            }
            rewritten_documents.push(rewritten);
        }

        self.progress_reporter.report_completion(&format!(
            "{} finished: {} document(s) changed, {} generated",
            analysis.name(),
            changed.len(),
            generated_paths.len()
        ));

        PipelineOutcome {
            documents: rewritten_documents,
            changed,
            generated: generated_paths,
            scan_failures,
        }
    }
}

async fn scan_document<A: ScanningAnalysis>(
    analysis: &A,
    document: &BuildDocument,
) -> Result<A::Accumulator> {
    match document {
        BuildDocument::Maven(project) => analysis.scan_maven(project).await,
        BuildDocument::Gradle(project) => analysis.scan_gradle(project).await,
        BuildDocument::Plain(document) => analysis.scan_plain(document).await,
    }
}
