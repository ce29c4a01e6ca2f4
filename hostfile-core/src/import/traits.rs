//! Format reader trait and import result types.
//!
//! This module defines the abstractions shared by every input format, so the
//! pipeline can treat all readers uniformly.

use std::fs;
use std::path::Path;

use crate::error::{FormatError, ImportError};
use crate::models::{CanonicalHostRecord, RawRecord};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Lazy sequence of raw records produced by a reader
pub type RawRecords<'a> = Box<dyn Iterator<Item = Result<RawRecord, FormatError>> + 'a>;

/// Reads an input file into memory.
///
/// # Errors
/// Returns `ImportError::Io` carrying the path if the file cannot be read.
pub fn read_import_file(path: &Path) -> Result<Vec<u8>, ImportError> {
    fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes UTF-8 input, skipping a leading byte order mark.
///
/// # Errors
/// Returns `FormatError::InvalidEncoding` with the byte offset (within the
/// original input) of the first invalid byte.
pub fn decode_utf8(content: &[u8]) -> Result<&str, FormatError> {
    let (offset, body) = match content.strip_prefix(UTF8_BOM) {
        Some(rest) => (UTF8_BOM.len(), rest),
        None => (0, content),
    };
    std::str::from_utf8(body).map_err(|e| FormatError::InvalidEncoding {
        offset: offset + e.valid_up_to(),
    })
}

/// Result of an import run: the produced hosts plus everything that did not
/// make it into the output.
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Canonical host records in input order
    pub hosts: Vec<CanonicalHostRecord>,
    /// Records left out on purpose (filtered or duplicate)
    pub skipped: Vec<SkippedEntry>,
    /// Per-record failures collected in best-effort mode
    pub errors: Vec<ImportError>,
    /// Counters for the run
    pub statistics: ImportStatistics,
}

impl ImportResult {
    /// Creates a new empty import result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries processed
    #[must_use]
    pub fn total_processed(&self) -> usize {
        self.hosts.len() + self.skipped.len() + self.errors.len()
    }

    /// Returns true if the import had any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if any entries were skipped
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Returns a one-line summary of the import result
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Imported: {}, Skipped: {}, Errors: {}",
            self.hosts.len(),
            self.skipped.len(),
            self.errors.len()
        )
    }

    /// Adds a skipped entry to the result
    pub fn add_skipped(&mut self, entry: SkippedEntry) {
        self.skipped.push(entry);
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: ImportError) {
        self.errors.push(error);
    }
}

/// A record that was left out of the output without being an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Hostname of the skipped record
    pub identifier: String,
    /// Reason why the record was skipped
    pub reason: String,
    /// Source location
    pub location: Option<String>,
}

impl SkippedEntry {
    /// Creates a new skipped entry
    #[must_use]
    pub fn new(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
            location: None,
        }
    }

    /// Creates a new skipped entry with location information
    #[must_use]
    pub fn with_location(
        identifier: impl Into<String>,
        reason: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
            location: Some(location.into()),
        }
    }
}

/// Counters collected during one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStatistics {
    /// Records produced by the reader (including failed ones)
    pub records_read: usize,
    /// Hosts in the output
    pub imported: usize,
    /// Records that failed to parse, classify, or were rejected as duplicates
    pub failed: usize,
    /// Hosts dropped by host filters
    pub filtered: usize,
    /// Records whose hostname was already seen
    pub duplicates: usize,
    /// Hostnames taken from an address field
    pub address_fallbacks: usize,
    /// Warnings generated during import
    pub warnings: Vec<String>,
}

impl ImportStatistics {
    /// Creates new empty statistics
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records_read: 0,
            imported: 0,
            failed: 0,
            filtered: 0,
            duplicates: 0,
            address_fallbacks: 0,
            warnings: Vec::new(),
        }
    }

    /// Records a warning
    pub fn record_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns true if any warnings were generated
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the share of read records that failed, as a percentage
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // record counts stay far below 2^52
    pub fn failure_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.failed as f64 / self.records_read as f64) * 100.0
        }
    }

    /// Generates a detailed report of the import
    #[must_use]
    pub fn detailed_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();

        let _ = write!(
            report,
            "Import Statistics:\n\
             - Records read: {}\n\
             - Hosts imported: {}\n\
             - Failed: {} ({:.1}%)\n\
             - Filtered: {}\n\
             - Duplicates: {}\n\
             - Hostname from address: {}\n",
            self.records_read,
            self.imported,
            self.failed,
            self.failure_rate(),
            self.filtered,
            self.duplicates,
            self.address_fallbacks,
        );

        if !self.warnings.is_empty() {
            report.push_str("\nWarnings:\n");
            for warning in &self.warnings {
                let _ = writeln!(report, "  - {warning}");
            }
        }

        report
    }
}

/// A parser for one input format.
///
/// Readers turn the bytes of a file into a lazy sequence of raw records.
/// Whole-document failures (bad encoding, malformed structure) are returned
/// by [`read`](Self::read) itself; failures confined to one record are
/// yielded as items so the caller can decide whether to continue.
pub trait FormatReader: Send + Sync {
    /// Returns the unique identifier for this format
    fn source_id(&self) -> &'static str;

    /// Returns a human-readable name for this format
    fn display_name(&self) -> &'static str;

    /// Returns true if the first field of every record is the hostname
    /// regardless of its name
    fn hostname_is_positional(&self) -> bool {
        false
    }

    /// Parses the input into raw records
    ///
    /// # Errors
    ///
    /// Returns an error if the document as a whole cannot be parsed.
    fn read<'a>(&self, content: &'a [u8]) -> Result<RawRecords<'a>, FormatError>;
}
