//! Shared utility functions used across command modules.

use std::path::{Path, PathBuf};

use hostfile_core::config::{ConfigManager, FileFormat, ImportConfiguration, load_config};
use hostfile_core::import::DuplicateHostPolicy;

use crate::cli::{DuplicatesArg, FormatArg, ImportArgs};
use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Resolves the import configuration file.
///
/// `config_path` may name a TOML file directly or a configuration directory
/// holding `import.toml`.
pub fn import_config_path(config_path: Option<&Path>) -> Result<PathBuf, CliError> {
    if let Some(path) = config_path {
        if path.is_file() || path.extension().is_some_and(|ext| ext == "toml") {
            return Ok(path.to_path_buf());
        }
    }
    Ok(create_config_manager(config_path)?.config_path())
}

/// Loads the import configuration, or the defaults when no file exists
pub fn load_import_config(config_path: Option<&Path>) -> Result<ImportConfiguration, CliError> {
    let path = import_config_path(config_path)?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No import configuration, using defaults");
        return Ok(ImportConfiguration::default());
    }
    Ok(load_config(&path)?)
}

/// Applies command-line overrides on top of a loaded configuration
pub fn apply_overrides(mut config: ImportConfiguration, args: &ImportArgs) -> ImportConfiguration {
    if let Some(format) = args.format {
        config = config.with_format(format.into());
    }
    if let Some(delimiter) = args.delimiter {
        config = config.with_delimiter(delimiter);
    }
    if let Some(duplicates) = args.duplicates {
        config = config.with_duplicate_hosts(duplicates.into());
    }
    if args.best_effort {
        config = config.with_halt_on_error(false);
    }
    if args.lowercase {
        config = config.with_lowercase(true);
    }
    if args.sanitize {
        config = config.with_replace_special_chars(true);
    }
    if args.normalize_hostnames {
        config = config.with_normalize_hostnames(true);
    }
    for filter in &args.filters {
        config = config.with_host_filter(filter.clone());
    }
    config
}

impl From<FormatArg> for FileFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Delimited => Self::Delimited,
            FormatArg::Structured => Self::Structured,
            FormatArg::VendorState => Self::VendorState,
        }
    }
}

impl From<DuplicatesArg> for DuplicateHostPolicy {
    fn from(policy: DuplicatesArg) -> Self {
        match policy {
            DuplicatesArg::Reject => Self::Reject,
            DuplicatesArg::Merge => Self::Merge,
            DuplicatesArg::LastWriteWins => Self::LastWriteWins,
            DuplicatesArg::KeepFirst => Self::KeepFirst,
        }
    }
}
