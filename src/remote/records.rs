//! Token service request and record types.

use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;

use crate::{
    permissions::{Access, Permission},
    state::TokenId,
};

/// Repositories a token may access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryScope {
    /// Every repository the owner can access.
    AllRepositories,

    /// Only the named repositories.
    SelectRepositories(BTreeSet<String>),
}

impl RepositoryScope {
    /// Scope for a configured repository selection; empty selects everything.
    pub fn from_selection(repositories: &BTreeSet<String>) -> Self {
        if repositories.is_empty() {
            Self::AllRepositories
        } else {
            Self::SelectRepositories(repositories.clone())
        }
    }
}

/// Parameters of a token creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    /// Token name.
    pub name: String,

    /// Expiry date.
    pub expires: Date,

    /// Repository scope.
    pub scope: RepositoryScope,

    /// Granted permissions.
    pub permissions: BTreeMap<Permission, Access>,
}

/// Expiry reported by the token service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteExpiry {
    /// The token expires on this date.
    On(Date),

    /// The token has already expired.
    Expired,
}

/// Token as reported by the token service.
///
/// Scope and permissions are not part of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Remote identifier.
    pub id: TokenId,

    /// Token name.
    pub name: String,

    /// Expiry.
    pub expires: RemoteExpiry,
}
