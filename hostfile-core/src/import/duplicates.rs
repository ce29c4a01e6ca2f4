//! Duplicate hostname handling.
//!
//! A hostname may appear at most once in the output of a run. What happens to
//! later records with an already-seen hostname is decided by
//! [`DuplicateHostPolicy`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::models::CanonicalHostRecord;

/// Strategy for records whose hostname was already produced in the same run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateHostPolicy {
    /// Report later duplicates as errors and keep the first record
    #[default]
    Reject,
    /// Merge later duplicates into the first record
    Merge,
    /// Replace the first record with the later one, keeping its position
    #[serde(alias = "lastWriteWins")]
    LastWriteWins,
    /// Silently keep the first record
    #[serde(alias = "keepFirst")]
    KeepFirst,
}

impl DuplicateHostPolicy {
    /// Returns all available policies
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Reject,
            Self::Merge,
            Self::LastWriteWins,
            Self::KeepFirst,
        ]
    }

    /// Identifier used in configuration files and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Merge => "merge",
            Self::LastWriteWins => "last_write_wins",
            Self::KeepFirst => "keep_first",
        }
    }

    /// Returns the display name for this policy
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Reject => "Reject duplicates",
            Self::Merge => "Merge duplicates",
            Self::LastWriteWins => "Last write wins",
            Self::KeepFirst => "Keep first",
        }
    }

    /// Returns a description of this policy
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Reject => "Report every repeated hostname as an error",
            Self::Merge => "Combine addresses, tags, labels, and attributes into the first record",
            Self::LastWriteWins => "Replace the earlier record with the later one",
            Self::KeepFirst => "Keep the first record and discard later ones",
        }
    }
}

impl std::fmt::Display for DuplicateHostPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DuplicateHostPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(Self::Reject),
            "merge" => Ok(Self::Merge),
            "last_write_wins" | "lastwritewins" => Ok(Self::LastWriteWins),
            "keep_first" | "keepfirst" => Ok(Self::KeepFirst),
            other => Err(format!("unknown duplicate policy '{other}'")),
        }
    }
}

/// Outcome of offering a host to the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First occurrence of the hostname
    Added,
    /// Folded into the earlier record
    Merged,
    /// Replaced the earlier record
    Replaced,
    /// Discarded in favor of the earlier record
    Discarded,
}

/// Applies a [`DuplicateHostPolicy`] while hosts are collected
#[derive(Debug)]
pub struct DuplicateResolver {
    policy: DuplicateHostPolicy,
    hosts: Vec<CanonicalHostRecord>,
    /// hostname -> (index into `hosts`, record position of first occurrence)
    seen: HashMap<String, (usize, usize)>,
}

impl DuplicateResolver {
    /// Creates an empty resolver
    #[must_use]
    pub fn new(policy: DuplicateHostPolicy) -> Self {
        Self {
            policy,
            hosts: Vec::new(),
            seen: HashMap::new(),
        }
    }

    /// Offers a host produced by the record at `position`.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::DuplicateHostname` under [`DuplicateHostPolicy::Reject`]
    /// when the hostname was seen before.
    pub fn admit(
        &mut self,
        position: usize,
        host: CanonicalHostRecord,
    ) -> Result<Admission, ImportError> {
        let Some(&(index, first_position)) = self.seen.get(host.hostname()) else {
            self.seen
                .insert(host.hostname().to_string(), (self.hosts.len(), position));
            self.hosts.push(host);
            return Ok(Admission::Added);
        };

        match self.policy {
            DuplicateHostPolicy::Reject => Err(ImportError::DuplicateHostname {
                hostname: host.hostname().to_string(),
                position,
                first_position,
            }),
            DuplicateHostPolicy::Merge => {
                self.hosts[index].merge_from(host);
                Ok(Admission::Merged)
            }
            DuplicateHostPolicy::LastWriteWins => {
                self.hosts[index] = host;
                Ok(Admission::Replaced)
            }
            DuplicateHostPolicy::KeepFirst => Ok(Admission::Discarded),
        }
    }

    /// Number of distinct hosts collected so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns true if no host was admitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Returns the collected hosts in order of first occurrence
    #[must_use]
    pub fn into_hosts(self) -> Vec<CanonicalHostRecord> {
        self.hosts
    }
}
