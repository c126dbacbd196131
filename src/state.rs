//! Token Resource State

use std::{collections::BTreeSet, fmt, num::ParseIntError, str::FromStr};

use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};

use crate::{
    remote::{RemoteExpiry, RepositoryScope, TokenRecord},
    value::{self, Value},
};

/// Version of the persisted state layout.
pub const SCHEMA_VERSION: u64 = 1;

/// Remote token identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u64);

impl TokenId {
    /// Wrap a raw remote identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw remote identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TokenId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(Self)
    }
}

// State documents carry the identifier as a decimal string.
impl Serialize for TokenId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Attribute of the token resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenAttribute {
    /// Operator-chosen token name.
    Name,
    /// Expiry date.
    Expires,
    /// Repository scope; empty means all repositories.
    SelectRepositories,
    /// Permissions granted read access.
    ReadPermissions,
    /// Permissions granted write access.
    WritePermissions,
}

impl TokenAttribute {
    /// Schema name of the attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Expires => "expires",
            Self::SelectRepositories => "select_repositories",
            Self::ReadPermissions => "read_permissions",
            Self::WritePermissions => "write_permissions",
        }
    }
}

impl fmt::Display for TokenAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired configuration of a token, as declared by the operator.
///
/// Optional attributes stay `Null` until default resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token name, also the remote lookup key.
    pub name: String,

    /// Expiry date; one day from planning when unset.
    #[serde(default, with = "value::as_option")]
    pub expires: Value<Date>,

    /// Repositories the token is limited to; all repositories when empty.
    #[serde(default, with = "value::as_option")]
    pub select_repositories: Value<BTreeSet<String>>,

    /// Permissions granted read access.
    #[serde(default, with = "value::as_option")]
    pub read_permissions: Value<BTreeSet<String>>,

    /// Permissions granted write access.
    #[serde(default, with = "value::as_option")]
    pub write_permissions: Value<BTreeSet<String>>,
}

impl TokenConfig {
    /// Configuration with only a name; every optional attribute unset.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Resolved state of a managed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    /// Remote identifier; `Unknown` while a create is pending.
    #[serde(default)]
    pub id: Value<TokenId>,

    /// Token name.
    pub name: String,

    /// Date on which the token stops working.
    pub expires: Date,

    /// Repository scope; empty means all repositories.
    #[serde(default)]
    pub select_repositories: BTreeSet<String>,

    /// Permissions granted read access.
    #[serde(default)]
    pub read_permissions: BTreeSet<String>,

    /// Permissions granted write access.
    #[serde(default)]
    pub write_permissions: BTreeSet<String>,
}

impl TokenState {
    /// Build state from a remote record.
    ///
    /// The token service does not report scope or permissions, so those sets
    /// are left empty for the caller to fill in. A token that has already
    /// expired is dated the day before `today`.
    pub fn from_record(record: TokenRecord, today: Date) -> Self {
        let expires = match record.expires {
            RemoteExpiry::On(date) => date,
            RemoteExpiry::Expired => today.saturating_sub(1.day()),
        };

        Self {
            id: Value::Known(record.id),
            name: record.name,
            expires,
            select_repositories: BTreeSet::new(),
            read_permissions: BTreeSet::new(),
            write_permissions: BTreeSet::new(),
        }
    }

    /// Replace scope and permissions with those of `source`.
    #[must_use]
    pub fn with_access_of(mut self, source: &Self) -> Self {
        self.select_repositories
            .clone_from(&source.select_repositories);
        self.read_permissions.clone_from(&source.read_permissions);
        self.write_permissions.clone_from(&source.write_permissions);
        self
    }

    /// Repository scope for the token service.
    pub fn scope(&self) -> RepositoryScope {
        RepositoryScope::from_selection(&self.select_repositories)
    }
}
