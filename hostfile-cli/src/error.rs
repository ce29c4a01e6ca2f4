//! CLI error types and exit codes.

use hostfile_core::error::{ConfigError, ImportError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, I/O, or other non-data errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Invalid input data - malformed file or records that cannot be
    /// normalized
    pub const INVALID_DATA: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Import run failed outside of the input data
    #[error("Import error: {0}")]
    Import(String),

    /// Input data could not be normalized
    #[error("Invalid input: {0}")]
    InvalidData(String),

    /// Output serialization error
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ImportError> for CliError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Config(e) => Self::Config(e.to_string()),
            ImportError::Io { .. } => Self::Import(err.to_string()),
            ImportError::Format(_)
            | ImportError::Classification(_)
            | ImportError::DuplicateHostname { .. } => Self::InvalidData(err.to_string()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, import I/O, output, IO)
    /// - 2: Invalid input data (format, classification, duplicates)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidData(_) => exit_codes::INVALID_DATA,
            Self::Config(_) | Self::Import(_) | Self::Output(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
