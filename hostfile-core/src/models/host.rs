//! Canonical host record model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ImportConfiguration;

/// A normalized host description.
///
/// Produced once per raw record by the record builder. The public API is
/// read-only; the `with_*` constructors exist for building expected values
/// and for callers assembling records outside of an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalHostRecord {
    hostname: String,
    #[serde(default)]
    addresses: Vec<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl CanonicalHostRecord {
    /// Creates a record with only a hostname
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            addresses: Vec::new(),
            tags: BTreeMap::new(),
            labels: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an address, ignoring values already present
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.push_address(address.into());
        self
    }

    /// Sets a tag
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Sets a label
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The host's name
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Network addresses in first-seen order, without duplicates
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Tags by key
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Labels by key
    pub const fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Attributes by key
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns the address a management system should contact.
    ///
    /// This is the first address; when that value is itself a comma
    /// separated list only its first element counts.
    pub fn primary_address(&self) -> Option<&str> {
        self.addresses
            .first()
            .and_then(|address| address.split(',').map(str::trim).find(|a| !a.is_empty()))
    }

    /// Re-serializes the record into prefixed field names.
    ///
    /// The hostname comes first under `hostname`, every address under the
    /// first configured address field name, followed by tags, labels, and
    /// attributes under their configured prefixes. Classifying the result
    /// with the same configuration yields the same tags, labels, and
    /// attributes.
    pub fn to_fields(&self, config: &ImportConfiguration) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(
            1 + self.addresses.len() + self.tags.len() + self.labels.len() + self.attributes.len(),
        );
        fields.push(("hostname".to_string(), self.hostname.clone()));

        if let Some(address_field) = config.address_field_names.iter().next() {
            fields.extend(
                self.addresses
                    .iter()
                    .map(|address| (address_field.clone(), address.clone())),
            );
        }

        let prefixed = |prefix: &str, map: &BTreeMap<String, String>| {
            map.iter()
                .map(|(key, value)| (format!("{prefix}{key}"), value.clone()))
                .collect::<Vec<_>>()
        };
        fields.extend(prefixed(&config.tag_prefix, &self.tags));
        fields.extend(prefixed(&config.label_prefix, &self.labels));
        fields.extend(prefixed(&config.attribute_prefix, &self.attributes));
        fields
    }

    pub(crate) fn push_address(&mut self, address: String) {
        if !self.addresses.contains(&address) {
            self.addresses.push(address);
        }
    }

    pub(crate) fn insert_tag(&mut self, key: String, value: String) {
        self.tags.insert(key, value);
    }

    pub(crate) fn insert_label(&mut self, key: String, value: String) {
        self.labels.insert(key, value);
    }

    pub(crate) fn insert_attribute(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    /// Folds a later record for the same host into this one
    pub(crate) fn merge_from(&mut self, other: Self) {
        for address in other.addresses {
            self.push_address(address);
        }
        self.tags.extend(other.tags);
        self.labels.extend(other.labels);
        self.attributes.extend(other.attributes);
    }
}
