//! `hostfile` Core Library
//!
//! This crate turns host inventory files into canonical host records that a
//! host-management system can consume.
//!
//! # Crate Structure
//!
//! - [`models`] - Raw records, field roles, and canonical host records
//! - [`config`] - Import configuration and its TOML persistence
//! - [`import`] - Format readers, field classifier, record builder, and the import pipeline
//! - [`error`] - Error taxonomy (format, classification, import, configuration)
//! - [`tracing`] - Tracing subscriber setup and span conventions
//!
//! # Example
//!
//! ```
//! use hostfile_core::config::ImportConfiguration;
//! use hostfile_core::import::ImportPipeline;
//!
//! let csv = b"HOSTNAME,STANDORT\nABC001,DARZ\n";
//! let pipeline = ImportPipeline::new(ImportConfiguration::default()).unwrap();
//! let result = pipeline.run(csv).unwrap();
//!
//! assert_eq!(result.hosts[0].hostname(), "ABC001");
//! assert_eq!(result.hosts[0].tags()["STANDORT"], "DARZ");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod tracing;

pub use config::{FileFormat, ImportConfiguration};
pub use error::{
    ClassificationError, ConfigError, ConfigResult, FormatError, HostfileError, ImportError,
};
pub use import::{
    DuplicateHostPolicy, FieldClassifier, FormatReader, HostRecordBuilder, ImportPipeline,
    ImportResult, ImportStatistics,
};
pub use models::{CanonicalHostRecord, FieldRole, RawRecord};
