use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
///
/// CI pipelines use these to tell "nothing to do" apart from "changes pending"
/// and from hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis finished and nothing needs attention
    Success = 0,
    /// `--check` found pending rewrites, or `--fail-on-findings` found vulnerabilities
    FindingsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Configuration, I/O or network error
    ApplicationError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::FindingsDetected => write!(f, "Findings Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Typed failures surfaced to the user.
///
/// Configuration variants are raised before any document is scanned; the
/// pipeline never produces them mid-run.
#[derive(Debug, Error)]
pub enum DepscopeError {
    #[error("Unknown scope '{scope}'\n\n💡 Hint: Valid scopes are: {valid}")]
    InvalidScope { scope: String, valid: String },

    #[error("Invalid pattern '{pattern}': {reason}\n\n💡 Hint: Patterns match group or artifact ids and may use '*' wildcards, e.g. 'com.fasterxml.*'")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid coordinate '{value}'\n\n💡 Hint: Use the form group:artifact:version, e.g. com.fasterxml.jackson.core:jackson-core:2.16.0")]
    InvalidCoordinate { value: String },

    #[error("Invalid configuration in {path}: {reason}\n\n💡 Hint: {hint}")]
    InvalidConfig {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Workspace snapshot not found: {path}\n\n💡 Hint: Export the parsed build documents to JSON first, or pass --input <file>")]
    WorkspaceNotFound { path: PathBuf },

    #[error("Failed to parse workspace snapshot: {path}\nDetails: {details}\n\n💡 Hint: The snapshot must be a JSON object with a \"documents\" array")]
    WorkspaceParseError { path: PathBuf, details: String },

    #[error("No metadata found for {coordinate} in {repositories} repositories")]
    MetadataNotFound {
        coordinate: String,
        repositories: usize,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl DepscopeError {
    /// True for errors the user can fix by changing flags or the config file.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DepscopeError::InvalidScope { .. }
                | DepscopeError::InvalidPattern { .. }
                | DepscopeError::InvalidCoordinate { .. }
                | DepscopeError::InvalidConfig { .. }
        )
    }
}
