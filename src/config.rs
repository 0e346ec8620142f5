//! Configuration file support for depscope.
//!
//! Provides YAML-based configuration through `depscope.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use depscope::dependency_analysis::domain::{Repository, ResolvedCoordinate};
use depscope::dependency_analysis::policies::Relocation;
use depscope::shared::error::DepscopeError;
use depscope::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "depscope.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub default_repository: Option<String>,
    pub repositories: Option<Vec<Repository>>,
    pub concurrency: Option<usize>,
    pub relocations: Option<Vec<Relocation>>,
    pub check_coordinate: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config, path)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(path: &Path, reason: String, hint: &str) -> anyhow::Error {
    DepscopeError::InvalidConfig {
        path: PathBuf::from(path),
        reason,
        hint: hint.to_string(),
    }
    .into()
}

fn validate_repository_uri(uri: &str) -> bool {
    uri.starts_with("https://") || uri.starts_with("http://")
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile, path: &Path) -> Result<()> {
    if config.concurrency == Some(0) {
        return Err(invalid(
            path,
            "concurrency must be at least 1".to_string(),
            "Remove the field to use the default, or set a positive number.",
        ));
    }

    if let Some(uri) = &config.default_repository {
        if !validate_repository_uri(uri) {
            return Err(invalid(
                path,
                format!("default_repository '{}' is not an http(s) URI", uri),
                "Use the repository base URL, e.g. https://repo.maven.apache.org/maven2",
            ));
        }
    }

    for (i, repository) in config.repositories.iter().flatten().enumerate() {
        if !validate_repository_uri(&repository.uri) {
            return Err(invalid(
                path,
                format!("repositories[{}].uri '{}' is not an http(s) URI", i, repository.uri),
                "Each repository needs an http(s) 'uri' field.",
            ));
        }
    }

    for (i, relocation) in config.relocations.iter().flatten().enumerate() {
        relocation.validate().map_err(|e| {
            invalid(
                path,
                format!("relocations[{}]: {}", i, e),
                "Each relocation needs non-empty 'old_group' and 'new_group' fields.",
            )
        })?;
    }

    if let Some(coordinate) = &config.check_coordinate {
        coordinate.parse::<ResolvedCoordinate>().map_err(|_| {
            invalid(
                path,
                format!("check_coordinate '{}' is not group:artifact:version", coordinate),
                "Use a published artifact, e.g. com.fasterxml.jackson.core:jackson-core:2.16.0",
            )
        })?;
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
