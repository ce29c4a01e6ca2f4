//! Field role model.

use serde::{Deserialize, Serialize};

/// Semantic role of a single field within a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// The one field naming the host
    Hostname,
    /// A network address of the host
    Address,
    /// A free-form tag
    Tag,
    /// A label
    Label,
    /// A plain attribute, kept apart from tags
    Attribute,
}

impl FieldRole {
    /// Returns all roles in classification order
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hostname,
            Self::Address,
            Self::Tag,
            Self::Label,
            Self::Attribute,
        ]
    }

    /// Returns the lowercase identifier of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Address => "address",
            Self::Tag => "tag",
            Self::Label => "label",
            Self::Attribute => "attribute",
        }
    }
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
