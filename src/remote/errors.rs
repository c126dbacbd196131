//! Token service errors.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors reported by the token service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// No token matched the lookup.
    #[error("token not found")]
    NotFound,

    /// A token with the requested name already exists.
    #[error("a token named `{0}` already exists")]
    NameConflict(String),

    /// The service rejected the session credentials.
    #[error("token service rejected the credentials: {0}")]
    Authentication(String),

    /// The service answered with something other than what was asked for.
    #[error("unexpected response from token service: {0}")]
    UnexpectedResponse(String),

    /// The request did not complete.
    #[error("token service transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
}

impl RemoteError {
    /// Wrap a transport-level failure.
    pub fn transport<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Transport(Box::new(error))
    }
}
