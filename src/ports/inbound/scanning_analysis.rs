use crate::dependency_analysis::domain::{
    BuildDocument, GradleProject, MavenProject, Merge, PlainDocument,
};
use crate::ports::outbound::ReportSink;
use crate::shared::Result;
use async_trait::async_trait;

/// A whole-workspace analysis driven by the pipeline in three phases.
///
/// * **scan** visits every document once and returns a partial accumulator;
///   the pipeline folds partials together with [`Merge::merge`].
/// * **generate** may synthesize new documents from the complete accumulator.
/// * **rewrite** visits every document again with the frozen accumulator.
///
/// Each phase has one method per document kind. Defaults do nothing, so an
/// analysis only implements the kinds it cares about.
#[async_trait]
pub trait ScanningAnalysis: Send + Sync {
    type Accumulator: Merge + Send + Sync;

    /// Short name used in progress messages.
    fn name(&self) -> &'static str;

    /// Rejects invalid options before any document is scanned.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// The empty accumulator. Merging it into anything is a no-op.
    fn initial_value(&self) -> Self::Accumulator;

    async fn scan_maven(&self, _project: &MavenProject) -> Result<Self::Accumulator> {
        Ok(self.initial_value())
    }

    async fn scan_gradle(&self, _project: &GradleProject) -> Result<Self::Accumulator> {
        Ok(self.initial_value())
    }

    async fn scan_plain(&self, _document: &PlainDocument) -> Result<Self::Accumulator> {
        Ok(self.initial_value())
    }

    /// New documents to add to the workspace. Never modifies `documents`.
    async fn generate(
        &self,
        _accumulator: &Self::Accumulator,
        _documents: &[BuildDocument],
        _sink: &dyn ReportSink,
    ) -> Vec<BuildDocument> {
        Vec::new()
    }

    fn rewrite_maven(
        &self,
        _project: &mut MavenProject,
        _accumulator: &Self::Accumulator,
        _sink: &dyn ReportSink,
    ) {
    }

    fn rewrite_gradle(
        &self,
        _project: &mut GradleProject,
        _accumulator: &Self::Accumulator,
        _sink: &dyn ReportSink,
    ) {
    }

    fn rewrite_plain(
        &self,
        _document: &mut PlainDocument,
        _accumulator: &Self::Accumulator,
        _sink: &dyn ReportSink,
    ) {
    }
}
