//! Error types for the normalization engine.
//!
//! Errors are split by the stage that detects them:
//! - [`FormatError`] - the input is malformed at the syntax level
//! - [`ClassificationError`] - a record is well formed but no hostname can be derived
//! - [`ImportError`] - run-level failures that wrap the two above
//! - [`ConfigError`] - configuration loading and validation

use std::path::PathBuf;

use thiserror::Error;

/// Malformed input detected by a format reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Input is not valid UTF-8
    #[error("input is not valid UTF-8 (first invalid byte at offset {offset})")]
    InvalidEncoding {
        /// Byte offset of the first invalid byte
        offset: usize,
    },

    /// Delimited input has no header row
    #[error("missing header row")]
    MissingHeader,

    /// A delimited row does not have as many columns as the header
    #[error("row {row} (line {line}) has {found} columns, header defines {expected}")]
    ColumnCount {
        /// 1-based data row number
        row: usize,
        /// Line in the file where the row starts
        line: u64,
        /// Column count of the header
        expected: usize,
        /// Column count of the row
        found: usize,
    },

    /// Delimited text could not be tokenized
    #[error("malformed delimited text at {}: {reason}", describe_line(*.line))]
    Delimited {
        /// Line of the failure, if known
        line: Option<u64>,
        /// Parser message
        reason: String,
    },

    /// Structured document has invalid syntax
    #[error("malformed {format} document at line {line}, column {column}: {reason}")]
    Syntax {
        /// Name of the document format
        format: &'static str,
        /// Line of the failure
        line: usize,
        /// Column of the failure
        column: usize,
        /// Parser message
        reason: String,
    },

    /// Structured document ends before it is complete
    #[error("truncated {format} document at line {line}, column {column}")]
    Truncated {
        /// Name of the document format
        format: &'static str,
        /// Line where input ended
        line: usize,
        /// Column where input ended
        column: usize,
    },

    /// Top-level value of a structured document is not an array
    #[error("expected a top-level array in {format} document, found {found}")]
    NotAnArray {
        /// Name of the document format
        format: &'static str,
        /// Kind of value that was found
        found: &'static str,
    },

    /// An array element is not an object
    #[error("element {position} of {format} document is {found}, expected an object")]
    UnexpectedElement {
        /// Name of the document format
        format: &'static str,
        /// 1-based element position
        position: usize,
        /// Kind of value that was found
        found: &'static str,
    },
}

fn describe_line(line: Option<u64>) -> String {
    line.map_or_else(|| "unknown position".to_string(), |l| format!("line {l}"))
}

impl FormatError {
    /// Returns the 1-based record position this error refers to, if it is
    /// limited to a single record.
    #[must_use]
    pub const fn record_position(&self) -> Option<usize> {
        match self {
            Self::ColumnCount { row, .. } => Some(*row),
            Self::UnexpectedElement { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// A syntactically valid record whose hostname cannot be determined.
///
/// Every variant carries the raw field names of the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// No field qualifies as hostname
    #[error("record {position}: no hostname field found (fields: {})", .fields.join(", "))]
    MissingHostname {
        /// 1-based record position
        position: usize,
        /// Raw field names of the record
        fields: Vec<String>,
    },

    /// More than one field qualifies as hostname
    #[error(
        "record {position}: ambiguous hostname, candidates {} (fields: {})",
        .candidates.join(", "),
        .fields.join(", ")
    )]
    AmbiguousHostname {
        /// 1-based record position
        position: usize,
        /// Fields that matched a hostname name
        candidates: Vec<String>,
        /// Raw field names of the record
        fields: Vec<String>,
    },

    /// The hostname field exists but holds no value
    #[error("record {position}: hostname field '{field}' is empty")]
    EmptyHostname {
        /// 1-based record position
        position: usize,
        /// Name of the hostname field
        field: String,
        /// Raw field names of the record
        fields: Vec<String>,
    },
}

impl ClassificationError {
    /// Returns the 1-based record position
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::MissingHostname { position, .. }
            | Self::AmbiguousHostname { position, .. }
            | Self::EmptyHostname { position, .. } => *position,
        }
    }

    /// Returns the raw field names of the offending record
    #[must_use]
    pub fn fields(&self) -> &[String] {
        match self {
            Self::MissingHostname { fields, .. }
            | Self::AmbiguousHostname { fields, .. }
            | Self::EmptyHostname { fields, .. } => fields,
        }
    }
}

/// Run-level import failures.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Malformed input
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Record without derivable hostname
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// Hostname already produced by an earlier record of the same run
    #[error(
        "record {position}: duplicate hostname '{hostname}' (first defined by record {first_position})"
    )]
    DuplicateHostname {
        /// The duplicated hostname
        hostname: String,
        /// 1-based position of the rejected record
        position: usize,
        /// 1-based position of the record that defined the hostname first
        first_position: usize,
    },

    /// Input file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration rejected before the run started
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ImportError {
    /// Returns the 1-based record position this error refers to, if any
    #[must_use]
    pub const fn record_position(&self) -> Option<usize> {
        match self {
            Self::Format(e) => e.record_position(),
            Self::Classification(e) => Some(e.position()),
            Self::DuplicateHostname { position, .. } => Some(*position),
            Self::Io { .. } | Self::Config(_) => None,
        }
    }

    /// Returns true if the error is confined to a single record, so a
    /// best-effort run can skip it and continue
    #[must_use]
    pub const fn is_record_error(&self) -> bool {
        self.record_position().is_some()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration {}: {source}", .path.display())]
    Read {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be written
    #[error("failed to write configuration {}: {source}", .path.display())]
    Write {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML could not be produced
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No configuration directory could be determined
    #[error("configuration directory not found")]
    NoConfigDir,

    /// Host filter is not a valid regular expression
    #[error("invalid host filter '{pattern}': {source}")]
    HostFilter {
        /// The rejected pattern
        pattern: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },

    /// Semantically invalid option value
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error type of the library.
#[derive(Debug, Error)]
pub enum HostfileError {
    /// Import failure
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O failure outside of an import run
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
