use crate::dependency_analysis::domain::BuildDocument;
use std::path::PathBuf;

/// PipelineOutcome - result of one scan → generate → rewrite run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Every document after rewrite, inputs first, then generated documents
    pub documents: Vec<BuildDocument>,
    /// Input documents the rewrite phase modified
    pub changed: Vec<PathBuf>,
    /// Documents added by the generate phase
    pub generated: Vec<PathBuf>,
    /// Documents whose scan failed and contributed nothing to the accumulator
    pub scan_failures: usize,
}

impl PipelineOutcome {
    /// True when writing the documents back would change the workspace.
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty() || !self.generated.is_empty()
    }
}
