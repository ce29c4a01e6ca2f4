//! Field classification.
//!
//! Decides which field of a raw record names the host, which fields are
//! network addresses, and sorts every remaining field into tags, labels, and
//! attributes by naming convention.
//!
//! The hostname is determined by an ordered rule list (see
//! [`HostnameRule::ORDER`]); the first rule that applies wins and removes its
//! field from further classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ImportConfiguration;
use crate::error::ClassificationError;
use crate::models::{FieldRole, RawRecord};

/// Field names (case-insensitive) that name the host in non-positional formats
pub const HOSTNAME_FIELD_NAMES: [&str; 3] = ["hostname", "host", "name"];

/// Matches `<name>:sep(<separator>)` field names
static MULTI_VALUE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*):sep\((.+)\)$").expect("MULTI_VALUE_FIELD is a valid regex pattern")
});

/// How the hostname of a record was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostnameRule {
    /// The first field of a positional format
    Positional,
    /// A field named `hostname`, `host`, or `name`
    FieldName,
    /// The value of the first address field, used when nothing else matched
    AddressFallback,
}

impl HostnameRule {
    /// Rules in the order they are tried
    pub const ORDER: [Self; 3] = [Self::Positional, Self::FieldName, Self::AddressFallback];

    /// Returns a description of this rule
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Positional => "first column",
            Self::FieldName => "hostname field",
            Self::AddressFallback => "address field",
        }
    }
}

/// One classified field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    /// Raw field name
    pub name: String,
    /// Assigned role
    pub role: FieldRole,
    /// Key under which the value is stored (prefix stripped)
    pub key: String,
    /// Field value
    pub value: String,
}

/// Classifier output for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFields {
    /// 1-based record position
    pub position: usize,
    /// Trimmed hostname
    pub hostname: String,
    /// Raw name of the field the hostname came from
    pub hostname_field: String,
    /// Rule that produced the hostname
    pub hostname_rule: HostnameRule,
    /// Classified fields in record order; multi-value fields expand in place
    pub fields: Vec<ClassifiedField>,
}

impl ClassifiedFields {
    /// Iterates over fields with the given role
    pub fn with_role(&self, role: FieldRole) -> impl Iterator<Item = &ClassifiedField> {
        self.fields.iter().filter(move |f| f.role == role)
    }
}

/// Splits a trailing `:sep(x)` off a field name
fn split_multi_value(name: &str) -> (&str, Option<&str>) {
    MULTI_VALUE_FIELD.captures(name).map_or((name, None), |caps| {
        match (caps.get(1), caps.get(2)) {
            (Some(base), Some(sep)) => (base.as_str(), Some(sep.as_str())),
            _ => (name, None),
        }
    })
}

/// Strips `prefix` from `name` ignoring ASCII case; an empty remainder does
/// not count as prefixed
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    name.get(prefix.len()..).filter(|rest| !rest.is_empty())
}

/// Returns the first element of a comma separated value, trimmed
fn first_list_element(value: &str) -> &str {
    value
        .split(',')
        .map(str::trim)
        .find(|part| !part.is_empty())
        .unwrap_or("")
}

/// Classifies the fields of raw records
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    address_field_names: Vec<String>,
    tag_prefix: String,
    label_prefix: String,
    attribute_prefix: String,
}

impl FieldClassifier {
    /// Creates a classifier for the given configuration
    #[must_use]
    pub fn new(config: &ImportConfiguration) -> Self {
        Self {
            address_field_names: config
                .address_field_names
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
            tag_prefix: config.tag_prefix.clone(),
            label_prefix: config.label_prefix.clone(),
            attribute_prefix: config.attribute_prefix.clone(),
        }
    }

    /// Returns true if `name` is a configured address field name
    pub fn is_address_field(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.address_field_names.iter().any(|n| *n == name)
    }

    fn is_hostname_field(name: &str) -> bool {
        HOSTNAME_FIELD_NAMES
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    /// Classifies one record.
    ///
    /// With `hostname_is_positional` the first field is the hostname no
    /// matter its name.
    pub fn classify(
        &self,
        record: &RawRecord,
        hostname_is_positional: bool,
    ) -> Result<ClassifiedFields, ClassificationError> {
        let bases: Vec<(&str, Option<&str>)> = record
            .iter()
            .map(|(name, _)| split_multi_value(name))
            .collect();

        let (index, rule) = self.find_hostname(record, &bases, hostname_is_positional)?;
        let (hostname_field, raw_value) = &record.fields()[index];
        let hostname = match rule {
            HostnameRule::AddressFallback => first_list_element(raw_value),
            HostnameRule::Positional | HostnameRule::FieldName => raw_value.trim(),
        };
        if hostname.is_empty() {
            return Err(ClassificationError::EmptyHostname {
                position: record.position(),
                field: hostname_field.clone(),
                fields: record.field_names(),
            });
        }

        if rule == HostnameRule::AddressFallback {
            tracing::warn!(
                position = record.position(),
                field = %hostname_field,
                hostname,
                "No hostname field, using address as hostname"
            );
        }

        let mut fields = Vec::with_capacity(record.len());
        for (i, ((name, value), (base, separator))) in record.iter().zip(&bases).enumerate() {
            if i == index && rule != HostnameRule::AddressFallback {
                fields.push(ClassifiedField {
                    name: name.to_string(),
                    role: FieldRole::Hostname,
                    key: (*base).to_string(),
                    value: hostname.to_string(),
                });
                if self.is_address_field(base) {
                    fields.push(ClassifiedField {
                        name: name.to_string(),
                        role: FieldRole::Address,
                        key: (*base).to_string(),
                        value: value.trim().to_string(),
                    });
                }
                continue;
            }
            self.classify_field(name, base, *separator, value, &mut fields);
        }

        tracing::debug!(
            position = record.position(),
            hostname,
            rule = rule.description(),
            fields = fields.len(),
            "Classified record"
        );

        Ok(ClassifiedFields {
            position: record.position(),
            hostname: hostname.to_string(),
            hostname_field: hostname_field.clone(),
            hostname_rule: rule,
            fields,
        })
    }

    fn find_hostname(
        &self,
        record: &RawRecord,
        bases: &[(&str, Option<&str>)],
        hostname_is_positional: bool,
    ) -> Result<(usize, HostnameRule), ClassificationError> {
        for rule in HostnameRule::ORDER {
            let found = match rule {
                HostnameRule::Positional => (hostname_is_positional && !record.is_empty())
                    .then_some(0),
                HostnameRule::FieldName => {
                    if hostname_is_positional {
                        continue;
                    }
                    let candidates: Vec<usize> = bases
                        .iter()
                        .enumerate()
                        .filter(|(_, (base, _))| Self::is_hostname_field(base))
                        .map(|(i, _)| i)
                        .collect();
                    if candidates.len() > 1 {
                        return Err(ClassificationError::AmbiguousHostname {
                            position: record.position(),
                            candidates: candidates
                                .iter()
                                .map(|&i| record.fields()[i].0.clone())
                                .collect(),
                            fields: record.field_names(),
                        });
                    }
                    candidates.first().copied()
                }
                HostnameRule::AddressFallback => {
                    if hostname_is_positional {
                        continue;
                    }
                    bases.iter().zip(record.iter()).position(|((base, _), (_, value))| {
                        self.is_address_field(base) && !first_list_element(value).is_empty()
                    })
                }
            };
            if let Some(index) = found {
                return Ok((index, rule));
            }
        }

        Err(ClassificationError::MissingHostname {
            position: record.position(),
            fields: record.field_names(),
        })
    }

    fn classify_field(
        &self,
        name: &str,
        base: &str,
        separator: Option<&str>,
        value: &str,
        out: &mut Vec<ClassifiedField>,
    ) {
        if self.is_address_field(base) {
            tracing::trace!(field = name, role = %FieldRole::Address, "Classified field");
            out.push(ClassifiedField {
                name: name.to_string(),
                role: FieldRole::Address,
                key: base.to_string(),
                value: value.trim().to_string(),
            });
            return;
        }

        let (role, key) = self.prefixed_role(base);
        tracing::trace!(field = name, role = %role, key, "Classified field");

        match separator {
            Some(separator) => out.extend(
                value
                    .split(separator)
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| ClassifiedField {
                        name: name.to_string(),
                        role,
                        key: format!("{key}/{part}"),
                        value: "true".to_string(),
                    }),
            ),
            None => out.push(ClassifiedField {
                name: name.to_string(),
                role,
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Role and key of a non-address field; unprefixed fields are tags
    fn prefixed_role<'a>(&self, base: &'a str) -> (FieldRole, &'a str) {
        [
            (&self.tag_prefix, FieldRole::Tag),
            (&self.label_prefix, FieldRole::Label),
            (&self.attribute_prefix, FieldRole::Attribute),
        ]
        .into_iter()
        .find_map(|(prefix, role)| strip_prefix_ignore_case(base, prefix).map(|key| (role, key)))
        .unwrap_or((FieldRole::Tag, base))
    }
}
