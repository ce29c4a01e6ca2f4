//! Host record builder.
//!
//! Turns classifier output into a [`CanonicalHostRecord`]. Later fields win
//! over earlier ones with the same key; addresses collapse to one entry each.

use std::collections::BTreeSet;

use super::classify::ClassifiedFields;
use super::normalize::normalize_hostname;
use crate::config::ImportConfiguration;
use crate::models::{CanonicalHostRecord, FieldRole};

/// Assembles canonical host records
#[derive(Debug, Clone, Default)]
pub struct HostRecordBuilder {
    reserved_attributes: BTreeSet<String>,
    normalize_hostnames: bool,
}

impl HostRecordBuilder {
    /// Creates a builder that keeps every attribute and hostnames as they are
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for the given configuration
    #[must_use]
    pub fn from_config(config: &ImportConfiguration) -> Self {
        Self {
            reserved_attributes: config.reserved_attributes.clone(),
            normalize_hostnames: config.normalize_hostnames,
        }
    }

    /// Builds the host record for one classified record
    #[must_use]
    pub fn build(&self, classified: ClassifiedFields) -> CanonicalHostRecord {
        let hostname = if self.normalize_hostnames {
            normalize_hostname(&classified.hostname)
        } else {
            classified.hostname
        };
        let mut host = CanonicalHostRecord::new(hostname);

        for field in classified.fields {
            if field.key.is_empty()
                && matches!(
                    field.role,
                    FieldRole::Tag | FieldRole::Label | FieldRole::Attribute
                )
            {
                tracing::debug!(
                    position = classified.position,
                    field = %field.name,
                    "Skipping field with empty name"
                );
                continue;
            }
            match field.role {
                FieldRole::Hostname => {}
                FieldRole::Address => {
                    if !field.value.is_empty() {
                        host.push_address(field.value);
                    }
                }
                FieldRole::Tag => host.insert_tag(field.key, field.value),
                FieldRole::Label => host.insert_label(field.key, field.value),
                FieldRole::Attribute => {
                    if self.reserved_attributes.contains(&field.key) {
                        tracing::debug!(
                            position = classified.position,
                            attribute = %field.key,
                            "Dropping reserved attribute"
                        );
                    } else {
                        host.insert_attribute(field.key, field.value);
                    }
                }
            }
        }

        host
    }
}
