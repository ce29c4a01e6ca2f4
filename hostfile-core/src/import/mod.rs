//! Import engine for host inventory files.
//!
//! Three input formats are supported, each behind the [`FormatReader`] trait:
//! - Delimited text with a header row (the first column is the hostname)
//! - Structured arrays of key-value objects
//! - BVQ state exports
//!
//! Every raw record then passes through the same stages:
//! - [`RecordNormalizer`] - optional lowercasing and character replacement
//! - [`FieldClassifier`] - finds the hostname and addresses, sorts the rest
//!   into tags, labels, and attributes
//! - [`HostRecordBuilder`] - assembles the [`CanonicalHostRecord`](crate::models::CanonicalHostRecord)
//!
//! [`ImportPipeline`] runs the stages and applies host filters and the
//! [`DuplicateHostPolicy`].
//!
//! ```
//! use hostfile_core::config::{FileFormat, ImportConfiguration};
//! use hostfile_core::import::ImportPipeline;
//!
//! let config = ImportConfiguration::for_format(FileFormat::Structured);
//! let pipeline = ImportPipeline::new(config).unwrap();
//! let result = pipeline
//!     .run(br#"[{"host":"srv1","ip":"10.0.0.5","tag_env":"prod"}]"#)
//!     .unwrap();
//!
//! assert_eq!(result.hosts[0].addresses(), ["10.0.0.5"]);
//! assert_eq!(result.hosts[0].tags()["env"], "prod");
//! ```

mod builder;
mod classify;
mod delimited;
mod duplicates;
mod normalize;
mod pipeline;
mod structured;
mod traits;
mod vendor;

pub use builder::HostRecordBuilder;
pub use classify::{
    ClassifiedField, ClassifiedFields, FieldClassifier, HOSTNAME_FIELD_NAMES, HostnameRule,
};
pub use delimited::DelimitedReader;
pub use duplicates::{Admission, DuplicateHostPolicy, DuplicateResolver};
pub use normalize::{NormalizeOptions, RecordNormalizer, normalize_hostname, replace_special_chars};
pub use pipeline::{HostRecords, ImportPipeline, ImportedHost, reader_for};
pub use structured::StructuredReader;
pub use traits::{
    FormatReader, ImportResult, ImportStatistics, RawRecords, SkippedEntry, decode_utf8,
    read_import_file,
};
pub use vendor::VendorStateReader;
