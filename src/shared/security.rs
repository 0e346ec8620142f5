use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound for any workspace snapshot or report we read back (100 MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Rejects symbolic links. Uses `symlink_metadata` so the link itself is inspected.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} of {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link; refusing to {} through it",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Requires `path` to be an existing regular file that is not a symlink.
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    validate_not_symlink(path, "read")?;

    let metadata = fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes, limit {} bytes)",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_regular_file_passes() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("workspace.json");
        fs::write(&file_path, "{}").unwrap();

        assert!(validate_not_symlink(&file_path, "read").is_ok());
        assert!(validate_regular_file(&file_path, "workspace snapshot").is_ok());
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "workspace snapshot");
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let path = PathBuf::from("/nonexistent/workspace.json");
        assert!(validate_not_symlink(&path, "read").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_regular_file(&link, "workspace snapshot");
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_file_size_limit() {
        let path = PathBuf::from("/test/workspace.json");
        assert!(validate_file_size(1000, &path, MAX_FILE_SIZE).is_ok());
        let err = validate_file_size(MAX_FILE_SIZE + 1, &path, MAX_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
