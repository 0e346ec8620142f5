use crate::dependency_analysis::domain::{BuildDocument, Workspace};
use crate::ports::outbound::WorkspaceReader;
use crate::shared::error::DepscopeError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for loading workspace snapshots
///
/// A snapshot is the JSON form of [`Workspace`]. Every document is normalized
/// after loading, so depth and direct flags never depend on what the producer
/// wrote.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Validate file is a regular file
    /// - Check file size limits
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        validate_regular_file(path, file_type)?;

        let metadata = fs::metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_type, e))?;
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_type, e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceReader for FileSystemReader {
    fn read_workspace(&self, path: &Path) -> Result<Vec<BuildDocument>> {
        if !path.exists() {
            return Err(DepscopeError::WorkspaceNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = self.safe_read_file(path, "workspace snapshot")?;
        let workspace: Workspace =
            serde_json::from_str(&content).map_err(|e| DepscopeError::WorkspaceParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        Ok(workspace
            .documents
            .into_iter()
            .map(|mut document| {
                document.normalize();
                document
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "documents": [
            {
                "kind": "maven",
                "path": "service/pom.xml",
                "group_id": "com.example",
                "artifact_id": "service",
                "version": "1.0.0",
                "resolved": {
                    "compile": [
                        {"group": "com.fasterxml.jackson.core", "artifact": "jackson-databind", "version": "2.17.0",
                         "depth": 7, "direct": false,
                         "children": [
                            {"group": "com.fasterxml.jackson.core", "artifact": "jackson-core", "version": "2.17.0"}
                         ]}
                    ]
                }
            },
            {"kind": "plain", "path": "README.md", "content": "hello"}
        ]
    }"#;

    #[test]
    fn test_read_workspace_normalizes_documents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("depscope-workspace.json");
        fs::write(&path, SNAPSHOT).unwrap();

        let documents = FileSystemReader::new().read_workspace(&path).unwrap();

        assert_eq!(documents.len(), 2);
        let project = documents[0].project().unwrap();
        let (_, nodes) = project.resolved_scopes()[0];
        assert_eq!(nodes[0].depth, 0);
        assert!(nodes[0].direct);
        assert_eq!(nodes[0].children[0].depth, 1);
        assert!(!nodes[0].children[0].direct);
        assert!(documents[1].project().is_none());
    }

    #[test]
    fn test_read_workspace_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSystemReader::new().read_workspace(&temp_dir.path().join("missing.json"));

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Workspace snapshot not found"));
    }

    #[test]
    fn test_read_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("depscope-workspace.json");
        fs::write(&path, "{ not json").unwrap();

        let result = FileSystemReader::new().read_workspace(&path);

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Failed to parse workspace snapshot"));
    }

    #[test]
    fn test_read_workspace_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSystemReader::new().read_workspace(temp_dir.path());
        assert!(result.is_err());
    }
}
