//! Data models for `hostfile`
//!
//! - [`RawRecord`] - one row or object as produced by a format reader
//! - [`FieldRole`] - the semantic role a field is classified into
//! - [`CanonicalHostRecord`] - the normalized host description

mod host;
mod record;
mod role;

pub use host::CanonicalHostRecord;
pub use record::RawRecord;
pub use role::FieldRole;
