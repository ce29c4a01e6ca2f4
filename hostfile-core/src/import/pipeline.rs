//! Import pipeline.
//!
//! Selects the reader for the configured format, then runs every raw record
//! through normalization, classification, and the record builder. Host
//! filters and the duplicate policy are applied by [`ImportPipeline::run`].

use std::path::Path;

use regex::Regex;

use super::builder::HostRecordBuilder;
use super::classify::{FieldClassifier, HostnameRule};
use super::delimited::DelimitedReader;
use super::duplicates::{Admission, DuplicateResolver};
use super::normalize::{NormalizeOptions, RecordNormalizer};
use super::structured::StructuredReader;
use super::traits::{
    FormatReader, ImportResult, ImportStatistics, SkippedEntry, read_import_file,
};
use super::vendor::VendorStateReader;
use crate::config::{FileFormat, ImportConfiguration};
use crate::error::{ConfigError, ImportError};
use crate::models::{CanonicalHostRecord, RawRecord};
use crate::tracing::span_names;

/// Lazy sequence of per-record outcomes
pub type HostRecords<'a> = Box<dyn Iterator<Item = Result<ImportedHost, ImportError>> + 'a>;

/// A host produced from one raw record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedHost {
    /// 1-based position of the source record
    pub position: usize,
    /// The canonical record
    pub host: CanonicalHostRecord,
    /// Rule that produced the hostname
    pub hostname_rule: HostnameRule,
}

/// Creates the reader for a configured format
pub fn reader_for(config: &ImportConfiguration) -> Result<Box<dyn FormatReader>, ConfigError> {
    Ok(match config.format {
        FileFormat::Delimited => Box::new(DelimitedReader::new(config.delimiter_byte()?)),
        FileFormat::Structured => Box::new(StructuredReader::new()),
        FileFormat::VendorState => Box::new(VendorStateReader::new(&config.label_prefix)),
    })
}

/// Turns input files into canonical host records.
///
/// A pipeline holds no state between runs; one instance can serve any number
/// of runs, from several threads at once.
pub struct ImportPipeline {
    config: ImportConfiguration,
    reader: Box<dyn FormatReader>,
    normalizer: RecordNormalizer,
    classifier: FieldClassifier,
    builder: HostRecordBuilder,
    host_filters: Vec<Regex>,
}

impl std::fmt::Debug for ImportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportPipeline")
            .field("format", &self.config.format)
            .field("reader", &self.reader.source_id())
            .field("host_filters", &self.config.host_filters)
            .finish_non_exhaustive()
    }
}

impl ImportPipeline {
    /// Creates a pipeline after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Config` if the configuration is inconsistent.
    pub fn new(config: ImportConfiguration) -> Result<Self, ImportError> {
        config.validate()?;
        let reader = reader_for(&config)?;
        let host_filters = config.compile_host_filters()?;

        Ok(Self {
            normalizer: RecordNormalizer::new(NormalizeOptions::from_config(&config)),
            classifier: FieldClassifier::new(&config),
            builder: HostRecordBuilder::from_config(&config),
            reader,
            host_filters,
            config,
        })
    }

    /// The configuration this pipeline was built with
    #[must_use]
    pub const fn config(&self) -> &ImportConfiguration {
        &self.config
    }

    /// The reader selected for the configured format
    #[must_use]
    pub fn reader(&self) -> &dyn FormatReader {
        self.reader.as_ref()
    }

    /// Returns true if `hostname` passes the host filters
    #[must_use]
    pub fn matches_filters(&self, hostname: &str) -> bool {
        self.host_filters.is_empty() || self.host_filters.iter().any(|re| re.is_match(hostname))
    }

    /// Streams one outcome per raw record.
    ///
    /// Nothing is parsed beyond what the caller pulls; dropping the iterator
    /// stops the run. Host filters and the duplicate policy are not applied
    /// here.
    ///
    /// # Errors
    ///
    /// Returns an error if the document as a whole cannot be read.
    pub fn records<'a>(&'a self, content: &'a [u8]) -> Result<HostRecords<'a>, ImportError> {
        let raw = self.reader.read(content)?;
        let positional = self.reader.hostname_is_positional();
        Ok(Box::new(raw.map(move |record| self.process(&record?, positional))))
    }

    fn process(&self, record: &RawRecord, positional: bool) -> Result<ImportedHost, ImportError> {
        let _span = crate::trace_operation_debug!(
            span_names::RECORD_CLASSIFY,
            position = record.position()
        )
        .entered();
        let record = self.normalizer.apply(record);
        let classified = self.classifier.classify(&record, positional)?;
        let hostname_rule = classified.hostname_rule;
        let position = classified.position;
        Ok(ImportedHost {
            position,
            host: self.builder.build(classified),
            hostname_rule,
        })
    }

    /// Runs the pipeline over one file's content.
    ///
    /// In halt mode the first failing record aborts the run. Otherwise
    /// failing records are collected in [`ImportResult::errors`] next to the
    /// produced hosts.
    ///
    /// # Errors
    ///
    /// Returns the first record error in halt mode, and any whole-document
    /// error in either mode.
    pub fn run(&self, content: &[u8]) -> Result<ImportResult, ImportError> {
        let _span = crate::trace_operation!(
            span_names::IMPORT_EXECUTE,
            format = %self.config.format,
            halt_on_error = self.config.halt_on_error
        )
        .entered();

        let mut result = ImportResult::new();
        let mut stats = ImportStatistics::new();
        let mut resolver = DuplicateResolver::new(self.config.duplicate_hosts);

        for item in self.records(content)? {
            stats.records_read += 1;
            let imported = match item {
                Ok(imported) => imported,
                Err(err) => {
                    self.record_failure(err, &mut result, &mut stats)?;
                    continue;
                }
            };
            let position = imported.position;
            let hostname = imported.host.hostname().to_string();
            let location = format!("record {position}");

            if imported.hostname_rule == HostnameRule::AddressFallback {
                stats.address_fallbacks += 1;
                stats.record_warning(format!(
                    "{location}: hostname '{hostname}' taken from an address field"
                ));
            }

            if !self.matches_filters(&hostname) {
                tracing::debug!(position, hostname = %hostname, "Host filtered out");
                stats.filtered += 1;
                result.add_skipped(SkippedEntry::with_location(
                    hostname,
                    "does not match any host filter",
                    location,
                ));
                continue;
            }

            match resolver.admit(position, imported.host) {
                Ok(Admission::Added) => {}
                Ok(admission @ (Admission::Merged | Admission::Replaced)) => {
                    tracing::debug!(position, hostname = %hostname, ?admission, "Duplicate hostname");
                    stats.duplicates += 1;
                }
                Ok(Admission::Discarded) => {
                    tracing::debug!(position, hostname = %hostname, "Duplicate hostname discarded");
                    stats.duplicates += 1;
                    result.add_skipped(SkippedEntry::with_location(
                        hostname,
                        "duplicate hostname",
                        location,
                    ));
                }
                Err(err) => {
                    stats.duplicates += 1;
                    self.record_failure(err, &mut result, &mut stats)?;
                }
            }
        }

        result.hosts = resolver.into_hosts();
        stats.imported = result.hosts.len();
        tracing::info!(
            records = stats.records_read,
            imported = stats.imported,
            failed = stats.failed,
            filtered = stats.filtered,
            duplicates = stats.duplicates,
            "Import finished"
        );
        result.statistics = stats;
        Ok(result)
    }

    /// Reads a file and runs the pipeline over it.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Io` if the file cannot be read, otherwise the
    /// same errors as [`run`](Self::run).
    pub fn run_file(&self, path: &Path) -> Result<ImportResult, ImportError> {
        tracing::debug!(path = %path.display(), "Reading import file");
        let content = read_import_file(path)?;
        self.run(&content)
    }

    /// Aborts in halt mode or on whole-document errors; otherwise records the
    /// failure and lets the run continue
    fn record_failure(
        &self,
        err: ImportError,
        result: &mut ImportResult,
        stats: &mut ImportStatistics,
    ) -> Result<(), ImportError> {
        if self.config.halt_on_error || !err.is_record_error() {
            return Err(err);
        }
        tracing::warn!(error = %err, "Skipping invalid record");
        stats.failed += 1;
        result.add_error(err);
        Ok(())
    }
}
