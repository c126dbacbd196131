//! Default Resolution
//!
//! The one place unset configuration values are replaced by their defaults.
//! Planning and every path that fabricates a next state go through
//! [`resolve`], so a resolved value is never compared against an unresolved
//! one.

use std::collections::BTreeSet;

use jiff::{ToSpan, civil::Date};
use thiserror::Error;

use crate::{
    state::{TokenAttribute, TokenConfig, TokenState},
    value::Value,
};

/// Days until a token expires when the configuration leaves `expires` unset.
pub const DEFAULT_LIFETIME_DAYS: i32 = 1;

/// A configuration value that is not known yet and so cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("`{0}` is not known yet and cannot be planned")]
pub struct UnresolvedAttribute(pub TokenAttribute);

/// Default expiry for a token planned on `today`.
pub fn default_expiry(today: Date) -> Date {
    today.saturating_add(DEFAULT_LIFETIME_DAYS.days())
}

/// Resolve `config` into a concrete state with a `Null` id.
///
/// # Errors
///
/// Returns the first attribute whose configured value is `Unknown`.
pub fn resolve(config: &TokenConfig, today: Date) -> Result<TokenState, UnresolvedAttribute> {
    let expires = match &config.expires {
        Value::Known(date) => *date,
        Value::Null => default_expiry(today),
        Value::Unknown => return Err(UnresolvedAttribute(TokenAttribute::Expires)),
    };

    Ok(TokenState {
        id: Value::Null,
        name: config.name.clone(),
        expires,
        select_repositories: resolve_set(
            &config.select_repositories,
            TokenAttribute::SelectRepositories,
        )?,
        read_permissions: resolve_set(&config.read_permissions, TokenAttribute::ReadPermissions)?,
        write_permissions: resolve_set(
            &config.write_permissions,
            TokenAttribute::WritePermissions,
        )?,
    })
}

fn resolve_set(
    value: &Value<BTreeSet<String>>,
    attribute: TokenAttribute,
) -> Result<BTreeSet<String>, UnresolvedAttribute> {
    match value {
        Value::Known(set) => Ok(set.clone()),
        Value::Null => Ok(BTreeSet::new()),
        Value::Unknown => Err(UnresolvedAttribute(attribute)),
    }
}
