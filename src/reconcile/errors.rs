//! Reconciliation errors.

use std::num::ParseIntError;

use thiserror::Error;

use crate::remote::RemoteError;

/// Failures that abort a reconciliation call.
///
/// Recoverable conditions are reported through diagnostics instead; these
/// indicate protocol misuse or a hard failure with no fallback.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A token was asked to be deleted before it was ever created.
    #[error("token `{name}` has no remote id")]
    MissingId {
        /// Name of the token in the prior state.
        name: String,
    },

    /// An import id was not a remote token id.
    #[error("`{id}` is not a valid token id")]
    InvalidId {
        /// The rejected id.
        id: String,

        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The token service failed in a way the call cannot recover from.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
