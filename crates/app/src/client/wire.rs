//! Token service request and response bodies.

use std::collections::{BTreeMap, BTreeSet};

use githubtok::{
    permissions::{Access, Permission},
    remote::{NewToken, RemoteError, RemoteExpiry, RepositoryScope, TokenRecord},
    state::TokenId,
};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) otp: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    pub(super) session: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum RepositorySelection {
    All,
    Selected,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateTokenRequest<'a> {
    pub(super) name: &'a str,
    pub(super) expires_on: Date,
    pub(super) repository_selection: RepositorySelection,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) repositories: Option<&'a BTreeSet<String>>,

    pub(super) permissions: &'a BTreeMap<Permission, Access>,
}

impl<'a> From<&'a NewToken> for CreateTokenRequest<'a> {
    fn from(token: &'a NewToken) -> Self {
        let (repository_selection, repositories) = match &token.scope {
            RepositoryScope::AllRepositories => (RepositorySelection::All, None),
            RepositoryScope::SelectRepositories(repositories) => {
                (RepositorySelection::Selected, Some(repositories))
            }
        };

        Self {
            name: &token.name,
            expires_on: token.expires,
            repository_selection,
            repositories,
            permissions: &token.permissions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateTokenResponse {
    pub(super) token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenList {
    #[serde(default)]
    pub(super) tokens: Vec<TokenInfo>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenInfo {
    pub(super) id: u64,
    pub(super) name: String,

    #[serde(default)]
    pub(super) expires_on: Option<Date>,

    #[serde(default)]
    pub(super) expired: bool,
}

impl TryFrom<TokenInfo> for TokenRecord {
    type Error = RemoteError;

    fn try_from(info: TokenInfo) -> Result<Self, Self::Error> {
        let expires = match (info.expired, info.expires_on) {
            (true, _) => RemoteExpiry::Expired,
            (false, Some(date)) => RemoteExpiry::On(date),
            (false, None) => {
                return Err(RemoteError::UnexpectedResponse(format!(
                    "token {} has neither an expiry date nor an expired marker",
                    info.id
                )));
            }
        };

        Ok(Self {
            id: TokenId::new(info.id),
            name: info.name,
            expires,
        })
    }
}
