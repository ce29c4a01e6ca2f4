//! Import configuration
//!
//! [`ImportConfiguration`] is read-only input to one import run. It is stored
//! as TOML; every key is optional and falls back to its default.

use std::collections::BTreeSet;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::import::DuplicateHostPolicy;

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    /// Delimited text with a header row
    #[default]
    #[serde(alias = "csv")]
    Delimited,
    /// Array of key-value objects
    #[serde(alias = "json")]
    Structured,
    /// BVQ state export
    #[serde(alias = "bvq")]
    VendorState,
}

impl FileFormat {
    /// Returns all formats
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Delimited, Self::Structured, Self::VendorState]
    }

    /// Identifier used in configuration files and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delimited => "delimited",
            Self::Structured => "structured",
            Self::VendorState => "vendor_state",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Delimited => "Delimited text (CSV)",
            Self::Structured => "Structured array (JSON)",
            Self::VendorState => "BVQ state export",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delimited" | "csv" => Ok(Self::Delimited),
            "structured" | "json" => Ok(Self::Structured),
            "vendor_state" | "vendor-state" | "bvq" => Ok(Self::VendorState),
            other => Err(ConfigError::Invalid(format!("unknown file format '{other}'"))),
        }
    }
}

/// Options for one import run
#[allow(clippy::struct_excessive_bools)] // independent toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfiguration {
    /// Input format
    #[serde(default)]
    pub format: FileFormat,
    /// Field names (case-insensitive) whose values are network addresses
    #[serde(default = "default_address_field_names")]
    pub address_field_names: BTreeSet<String>,
    /// Prefix marking tag fields
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
    /// Prefix marking label fields
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
    /// Prefix marking attribute fields
    #[serde(default = "default_attribute_prefix")]
    pub attribute_prefix: String,
    /// Attribute keys dropped from every record
    #[serde(default = "default_reserved_attributes")]
    pub reserved_attributes: BTreeSet<String>,
    /// Abort on the first invalid record (default: true)
    #[serde(default = "default_true")]
    pub halt_on_error: bool,
    /// Column delimiter for delimited text
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Lowercase field names and values before classification
    #[serde(default)]
    pub lowercase: bool,
    /// Replace umlauts, parentheses, and commas in values with `_`
    #[serde(default)]
    pub replace_special_chars: bool,
    /// Lowercase hostnames and replace spaces with `_`
    #[serde(default)]
    pub normalize_hostnames: bool,
    /// Regular expressions a hostname must match at its start to be imported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_filters: Vec<String>,
    /// What to do when a hostname appears twice
    #[serde(default)]
    pub duplicate_hosts: DuplicateHostPolicy,
}

fn default_address_field_names() -> BTreeSet<String> {
    ["ip", "ipv4", "ipaddress"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_tag_prefix() -> String {
    "tag_".to_string()
}

fn default_label_prefix() -> String {
    "label_".to_string()
}

fn default_attribute_prefix() -> String {
    "attr_".to_string()
}

fn default_reserved_attributes() -> BTreeSet<String> {
    ["locked_by", "labels", "meta_data"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_true() -> bool {
    true
}

const fn default_delimiter() -> char {
    ','
}

impl Default for ImportConfiguration {
    fn default() -> Self {
        Self {
            format: FileFormat::default(),
            address_field_names: default_address_field_names(),
            tag_prefix: default_tag_prefix(),
            label_prefix: default_label_prefix(),
            attribute_prefix: default_attribute_prefix(),
            reserved_attributes: default_reserved_attributes(),
            halt_on_error: true,
            delimiter: default_delimiter(),
            lowercase: false,
            replace_special_chars: false,
            normalize_hostnames: false,
            host_filters: Vec::new(),
            duplicate_hosts: DuplicateHostPolicy::default(),
        }
    }
}

impl ImportConfiguration {
    /// Creates a configuration for the given format with default options
    #[must_use]
    pub fn for_format(format: FileFormat) -> Self {
        Self::default().with_format(format)
    }

    /// Sets the input format
    #[must_use]
    pub const fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    /// Replaces the address field names
    #[must_use]
    pub fn with_address_field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.address_field_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tag prefix
    #[must_use]
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Sets the label prefix
    #[must_use]
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// Sets the attribute prefix
    #[must_use]
    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    /// Sets whether the first invalid record aborts the run
    #[must_use]
    pub const fn with_halt_on_error(mut self, halt: bool) -> Self {
        self.halt_on_error = halt;
        self
    }

    /// Sets the delimiter for delimited text
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables lowercasing of names and values
    #[must_use]
    pub const fn with_lowercase(mut self, enabled: bool) -> Self {
        self.lowercase = enabled;
        self
    }

    /// Enables or disables special character replacement in values
    #[must_use]
    pub const fn with_replace_special_chars(mut self, enabled: bool) -> Self {
        self.replace_special_chars = enabled;
        self
    }

    /// Enables or disables hostname normalization
    #[must_use]
    pub const fn with_normalize_hostnames(mut self, enabled: bool) -> Self {
        self.normalize_hostnames = enabled;
        self
    }

    /// Adds a host filter
    #[must_use]
    pub fn with_host_filter(mut self, pattern: impl Into<String>) -> Self {
        self.host_filters.push(pattern.into());
        self
    }

    /// Sets the duplicate hostname policy
    #[must_use]
    pub const fn with_duplicate_hosts(mut self, policy: DuplicateHostPolicy) -> Self {
        self.duplicate_hosts = policy;
        self
    }

    /// Parses a configuration from TOML
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration to TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns the delimiter as the single byte the delimited reader expects
    pub fn delimiter_byte(&self) -> ConfigResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii() && !matches!(*b, b'"' | b'\n' | b'\r'))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "delimiter {:?} must be a single ASCII character other than a quote or line break",
                    self.delimiter
                ))
            })
    }

    /// Compiles the host filters, anchored at the start of the hostname
    pub fn compile_host_filters(&self) -> ConfigResult<Vec<Regex>> {
        self.host_filters
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})")).map_err(|source| ConfigError::HostFilter {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Checks that the options are consistent
    pub fn validate(&self) -> ConfigResult<()> {
        let prefixes = [
            ("tag_prefix", &self.tag_prefix),
            ("label_prefix", &self.label_prefix),
            ("attribute_prefix", &self.attribute_prefix),
        ];
        for (name, prefix) in prefixes {
            if prefix.is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        for (i, (name, prefix)) in prefixes.iter().enumerate() {
            for (other_name, other) in &prefixes[i + 1..] {
                if prefix.eq_ignore_ascii_case(other) {
                    return Err(ConfigError::Invalid(format!(
                        "{name} and {other_name} must differ (both '{prefix}')"
                    )));
                }
            }
        }

        if self.address_field_names.is_empty() {
            return Err(ConfigError::Invalid(
                "address_field_names must not be empty".to_string(),
            ));
        }
        if self.address_field_names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "address_field_names must not contain blank names".to_string(),
            ));
        }

        self.delimiter_byte()?;
        self.compile_host_filters()?;
        Ok(())
    }
}
