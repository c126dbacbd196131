//! Diff Engine
//!
//! The token service cannot rename a token or change its expiry, scope or
//! permissions, so any difference in those attributes means the token must be
//! destroyed and created again.

use smallvec::SmallVec;

use crate::state::{TokenAttribute, TokenState};

/// Attributes whose change forced a replacement, in schema order.
pub type ReplaceAttributes = SmallVec<[TokenAttribute; 5]>;

/// Outcome of comparing a prior state with a proposed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The compared attributes are equal.
    NoChange,

    /// At least one attribute differs; lists every one that does.
    Replace(ReplaceAttributes),
}

impl Change {
    /// Returns `true` if the token must be replaced.
    pub const fn requires_replace(&self) -> bool {
        matches!(self, Self::Replace(_))
    }
}

/// Compare two resolved states.
///
/// The remote `id` takes no part in the comparison; sets compare by
/// membership.
pub fn classify(prior: &TokenState, proposed: &TokenState) -> Change {
    let mut differing = ReplaceAttributes::new();

    if prior.name != proposed.name {
        differing.push(TokenAttribute::Name);
    }

    if prior.expires != proposed.expires {
        differing.push(TokenAttribute::Expires);
    }

    if prior.select_repositories != proposed.select_repositories {
        differing.push(TokenAttribute::SelectRepositories);
    }

    if prior.read_permissions != proposed.read_permissions {
        differing.push(TokenAttribute::ReadPermissions);
    }

    if prior.write_permissions != proposed.write_permissions {
        differing.push(TokenAttribute::WritePermissions);
    }

    if differing.is_empty() {
        Change::NoChange
    } else {
        Change::Replace(differing)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::date;

    use crate::{state::TokenId, value::Value};

    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn state() -> TokenState {
        TokenState {
            id: Value::Known(TokenId::new(1)),
            name: "ci-token".to_string(),
            expires: date(2026, 1, 1),
            select_repositories: set(&["org/repo1", "org/repo2"]),
            read_permissions: set(&["contents"]),
            write_permissions: set(&["issues"]),
        }
    }

    #[test]
    fn identical_states_do_not_change() {
        assert_eq!(classify(&state(), &state()), Change::NoChange);
    }

    #[test]
    fn id_is_ignored() {
        let proposed = TokenState {
            id: Value::Unknown,
            ..state()
        };

        assert_eq!(classify(&state(), &proposed), Change::NoChange);
    }

    #[test]
    fn set_order_is_irrelevant() {
        let proposed = TokenState {
            select_repositories: ["org/repo2", "org/repo1"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..state()
        };

        assert!(!classify(&state(), &proposed).requires_replace());
    }

    #[test]
    fn each_attribute_forces_replacement_on_its_own() {
        let cases = [
            (
                TokenState {
                    name: "ci-token-v2".to_string(),
                    ..state()
                },
                TokenAttribute::Name,
            ),
            (
                TokenState {
                    expires: date(2026, 2, 1),
                    ..state()
                },
                TokenAttribute::Expires,
            ),
            (
                TokenState {
                    select_repositories: BTreeSet::new(),
                    ..state()
                },
                TokenAttribute::SelectRepositories,
            ),
            (
                TokenState {
                    read_permissions: set(&["contents", "metadata"]),
                    ..state()
                },
                TokenAttribute::ReadPermissions,
            ),
            (
                TokenState {
                    write_permissions: BTreeSet::new(),
                    ..state()
                },
                TokenAttribute::WritePermissions,
            ),
        ];

        for (proposed, attribute) in cases {
            assert_eq!(
                classify(&state(), &proposed),
                Change::Replace(ReplaceAttributes::from_slice(&[attribute])),
                "changing {attribute} alone should list only {attribute}"
            );
        }
    }

    #[test]
    fn every_differing_attribute_is_listed() {
        let proposed = TokenState {
            name: "renamed".to_string(),
            expires: date(2030, 1, 1),
            select_repositories: BTreeSet::new(),
            read_permissions: BTreeSet::new(),
            write_permissions: set(&["contents"]),
            id: Value::Unknown,
        };

        assert_eq!(
            classify(&state(), &proposed),
            Change::Replace(ReplaceAttributes::from_slice(&[
                TokenAttribute::Name,
                TokenAttribute::Expires,
                TokenAttribute::SelectRepositories,
                TokenAttribute::ReadPermissions,
                TokenAttribute::WritePermissions,
            ]))
        );
    }
}
