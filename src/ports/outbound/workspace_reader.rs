use crate::dependency_analysis::domain::BuildDocument;
use crate::shared::Result;
use std::path::Path;

/// WorkspaceReader port for loading parsed build documents
///
/// Parsing build files is done upstream; readers load the already-parsed
/// snapshot. Returned documents have normalized depth and direct flags.
pub trait WorkspaceReader {
    /// # Errors
    /// Returns an error if the snapshot is missing, unsafe to read, or malformed.
    fn read_workspace(&self, path: &Path) -> Result<Vec<BuildDocument>>;
}
