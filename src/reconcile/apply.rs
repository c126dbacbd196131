//! Applying planned changes.

use tracing::info;

use crate::{
    clock::Clock,
    diagnostics::Diagnostics,
    diff,
    permissions::permission_map,
    reconcile::{ReconcileError, TokenReconciler, release},
    remote::{NewToken, RemoteError, SessionProvider, TokenSession},
    state::{TokenId, TokenState},
};

impl<P: SessionProvider, C: Clock> TokenReconciler<P, C> {
    /// Realize a planned change against the token service.
    ///
    /// A missing `planned` state deletes the prior token. A planned state that
    /// needs a token creates one and returns the state read back from the
    /// service, with scope and permissions taken from the plan. Anything else
    /// returns `prior` unchanged without any remote call.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::MissingId`] when asked to delete a token whose
    /// prior state never received a remote id. Remote failures are recorded in
    /// `diagnostics` instead.
    pub async fn apply(
        &self,
        prior: Option<&TokenState>,
        planned: Option<&TokenState>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<TokenState>, ReconcileError> {
        let Some(planned) = planned else {
            return match prior {
                Some(prior) => self.delete(prior, diagnostics).await,
                None => Ok(None),
            };
        };

        if !needs_create(prior, planned) {
            return Ok(prior.cloned());
        }

        Ok(self.create(planned, diagnostics).await)
    }

    async fn delete(
        &self,
        prior: &TokenState,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<TokenState>, ReconcileError> {
        let id = prior
            .id
            .as_known()
            .copied()
            .ok_or_else(|| ReconcileError::MissingId {
                name: prior.name.clone(),
            })?;

        let Some(session) = self.open_session(diagnostics).await else {
            return Ok(Some(prior.clone()));
        };

        let deleted = delete_in_session(session.as_ref(), id, &prior.name, diagnostics).await;

        release(session).await;

        Ok(if deleted { None } else { Some(prior.clone()) })
    }

    async fn create(&self, planned: &TokenState, diagnostics: &mut Diagnostics) -> Option<TokenState> {
        let permissions =
            match permission_map(&planned.read_permissions, &planned.write_permissions) {
                Ok(permissions) => permissions,
                Err(error) => {
                    diagnostics.add_error_with_detail("not creating new token", error.to_string());

                    return None;
                }
            };

        let request = NewToken {
            name: planned.name.clone(),
            expires: planned.expires,
            scope: planned.scope(),
            permissions,
        };

        let session = self.open_session(diagnostics).await?;

        let created = self
            .create_in_session(session.as_ref(), &request, planned, diagnostics)
            .await;

        release(session).await;

        created
    }

    async fn create_in_session(
        &self,
        session: &dyn TokenSession,
        request: &NewToken,
        planned: &TokenState,
        diagnostics: &mut Diagnostics,
    ) -> Option<TokenState> {
        let secret = match session.create_token(request).await {
            Ok(secret) => secret,
            Err(error @ RemoteError::NameConflict(_)) => {
                diagnostics.add_error_with_detail("not creating new token", error.to_string());

                return None;
            }
            Err(error) => {
                diagnostics.add_error_with_detail("failed to create token", error.to_string());

                return None;
            }
        };

        info!(name = %request.name, expires = %request.expires, "created token");

        diagnostics.add_warning(format!("created token: {}", secret.expose()));

        match session.token_by_name(&request.name).await {
            Ok(record) => {
                Some(TokenState::from_record(record, self.clock.today()).with_access_of(planned))
            }
            Err(error) => {
                diagnostics.add_error_with_detail(
                    format!("created token `{}` could not be read back", request.name),
                    error.to_string(),
                );

                None
            }
        }
    }
}

fn needs_create(prior: Option<&TokenState>, planned: &TokenState) -> bool {
    match prior {
        None => true,
        Some(prior) => !planned.id.is_known() || diff::classify(prior, planned).requires_replace(),
    }
}

async fn delete_in_session(
    session: &dyn TokenSession,
    id: TokenId,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> bool {
    match session.delete_token(id).await {
        Ok(()) => {
            info!(%id, name, "deleted token");

            true
        }
        Err(RemoteError::NotFound) => {
            diagnostics.add_warning(format!("token `{name}` ({id}) was already gone"));

            true
        }
        Err(error) => {
            diagnostics.add_error_with_detail(
                format!("failed to delete token `{name}` ({id})"),
                error.to_string(),
            );

            false
        }
    }
}
