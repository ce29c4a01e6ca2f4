//! Record normalization.
//!
//! Optional transforms applied to each raw record before classification,
//! plus the hostname normalization applied by the record builder.

use std::borrow::Cow;

use crate::config::ImportConfiguration;
use crate::models::RawRecord;

/// Characters replaced by [`replace_special_chars`]
const SPECIAL_CHARS: &[char] = &['ä', 'ö', 'ü', 'Ä', 'Ö', 'Ü', '(', ')', ','];

/// Options for record normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Lowercase field names and values
    pub lowercase: bool,
    /// Replace umlauts, parentheses, and commas in values with `_`
    pub replace_special_chars: bool,
}

impl NormalizeOptions {
    /// Creates options with all transforms enabled
    #[must_use]
    pub const fn all() -> Self {
        Self {
            lowercase: true,
            replace_special_chars: true,
        }
    }

    /// Creates options with no transforms
    #[must_use]
    pub const fn none() -> Self {
        Self {
            lowercase: false,
            replace_special_chars: false,
        }
    }

    /// Takes the options from an import configuration
    #[must_use]
    pub const fn from_config(config: &ImportConfiguration) -> Self {
        Self {
            lowercase: config.lowercase,
            replace_special_chars: config.replace_special_chars,
        }
    }

    /// Returns true if no transform is enabled
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !self.lowercase && !self.replace_special_chars
    }
}

/// Applies [`NormalizeOptions`] to raw records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordNormalizer {
    options: NormalizeOptions,
}

impl RecordNormalizer {
    /// Creates a normalizer with the given options
    #[must_use]
    pub const fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Normalizes a record; records are borrowed unchanged when no transform
    /// is enabled
    pub fn apply<'a>(&self, record: &'a RawRecord) -> Cow<'a, RawRecord> {
        if self.options.is_noop() {
            return Cow::Borrowed(record);
        }

        let fields = record
            .iter()
            .map(|(name, value)| {
                let (name, mut value) = if self.options.lowercase {
                    (name.to_lowercase(), value.to_lowercase())
                } else {
                    (name.to_string(), value.to_string())
                };
                if self.options.replace_special_chars {
                    value = replace_special_chars(&value);
                }
                (name, value)
            })
            .collect();

        let normalized = RawRecord::new(record.position(), fields);
        Cow::Owned(match record.line() {
            Some(line) => normalized.with_line(line),
            None => normalized,
        })
    }
}

/// Replaces each of `äöüÄÖÜ(),` with `_`
#[must_use]
pub fn replace_special_chars(value: &str) -> String {
    value.replace(SPECIAL_CHARS, "_")
}

/// Lowercases a hostname and replaces spaces with `_`
#[must_use]
pub fn normalize_hostname(hostname: &str) -> String {
    hostname.to_lowercase().replace(' ', "_")
}
