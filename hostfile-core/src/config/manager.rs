//! Configuration file management
//!
//! [`ConfigManager`] owns the configuration directory
//! (`$XDG_CONFIG_HOME/hostfile` by default) and the `import.toml` inside it.

use std::fs;
use std::path::{Path, PathBuf};

use super::ImportConfiguration;
use crate::error::{ConfigError, ConfigResult};
use crate::tracing::span_names;

/// Name of the import configuration file inside the configuration directory
pub const IMPORT_CONFIG_FILE: &str = "import.toml";

/// Loads a configuration file
pub fn load_config(path: &Path) -> ConfigResult<ImportConfiguration> {
    let _span = tracing::debug_span!(span_names::CONFIG_LOAD, path = %path.display()).entered();

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ImportConfiguration::from_toml_str(&content)?;
    tracing::debug!(format = %config.format, "Loaded import configuration");
    Ok(config)
}

/// Writes a configuration file, creating parent directories as needed
pub fn save_config(path: &Path, config: &ImportConfiguration) -> ConfigResult<()> {
    let _span = tracing::debug_span!(span_names::CONFIG_SAVE, path = %path.display()).entered();

    let content = config.to_toml_string()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Locates and persists the import configuration
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the user's configuration directory
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("hostfile");
        Ok(Self { config_dir })
    }

    /// Creates a manager for an explicit directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of `import.toml`
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(IMPORT_CONFIG_FILE)
    }

    /// Loads `import.toml`, or the defaults when it does not exist
    pub fn load_import_config(&self) -> ConfigResult<ImportConfiguration> {
        let path = self.config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No import configuration, using defaults");
            return Ok(ImportConfiguration::default());
        }
        load_config(&path)
    }

    /// Writes `import.toml`
    pub fn save_import_config(&self, config: &ImportConfiguration) -> ConfigResult<()> {
        save_config(&self.config_path(), config)
    }
}
