//! Adopting existing tokens.

use tracing::info;

use crate::{
    clock::Clock,
    diagnostics::Diagnostics,
    reconcile::{ReconcileError, TokenReconciler, release},
    remote::{RemoteExpiry, SessionProvider},
    state::{TokenId, TokenState},
};

impl<P: SessionProvider, C: Clock> TokenReconciler<P, C> {
    /// Adopt the token with remote id `id` into management.
    ///
    /// The imported state has empty scope and permissions since the service
    /// does not report them; planning it against a fuller configuration will
    /// replace the token.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a token id, no token has that id, or the
    /// token service fails.
    pub async fn import(
        &self,
        id: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<TokenState, ReconcileError> {
        let token_id = id
            .parse::<TokenId>()
            .map_err(|source| ReconcileError::InvalidId {
                id: id.to_string(),
                source,
            })?;

        let session = self.sessions.open().await?;
        let lookup = session.token_by_id(token_id).await;

        release(session).await;

        let record = lookup?;

        if record.expires == RemoteExpiry::Expired {
            diagnostics.add_warning(format!("imported token `{}` has already expired", record.name));
        }

        info!(id = %token_id, name = %record.name, "imported token");

        Ok(TokenState::from_record(record, self.clock.today()))
    }
}
