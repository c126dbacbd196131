//! Remote Token Service
//!
//! The capability surface consumed by reconciliation: create a token, look
//! one up by name or id, and delete one. Every call runs inside a
//! [`TokenSession`] obtained from a [`SessionProvider`]; the reconciler opens
//! one session per entry point and closes it on every exit path.

use async_trait::async_trait;
use mockall::automock;

mod errors;
mod records;
mod secret;

pub use errors::RemoteError;
pub use records::*;
pub use secret::TokenSecret;

use crate::state::TokenId;

/// Authenticated session against the token service.
#[automock]
#[async_trait]
pub trait TokenSession: Send + Sync {
    /// Create a token and return its one-time secret.
    ///
    /// Fails with [`RemoteError::NameConflict`] when a token with the same
    /// name already exists.
    async fn create_token(&self, request: &NewToken) -> Result<TokenSecret, RemoteError>;

    /// Look up a token by name.
    async fn token_by_name(&self, name: &str) -> Result<TokenRecord, RemoteError>;

    /// Look up a token by remote id.
    async fn token_by_id(&self, id: TokenId) -> Result<TokenRecord, RemoteError>;

    /// Delete a token by remote id.
    async fn delete_token(&self, id: TokenId) -> Result<(), RemoteError>;

    /// Release the session.
    async fn close(&self) -> Result<(), RemoteError>;
}

/// Source of token service sessions.
#[automock]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Acquire a new session.
    async fn open(&self) -> Result<Box<dyn TokenSession>, RemoteError>;
}
