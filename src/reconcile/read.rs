//! Refreshing state from the token service.

use crate::{
    clock::Clock,
    diagnostics::Diagnostics,
    reconcile::{TokenReconciler, release},
    remote::{RemoteError, SessionProvider, TokenSession},
    state::TokenState,
};

impl<P: SessionProvider, C: Clock> TokenReconciler<P, C> {
    /// Refresh `current` from the token service, looking the token up by name.
    ///
    /// Returns `None` when the token no longer exists, which tells the caller
    /// to stop tracking it. Scope and permissions are kept from `current`
    /// because the service does not report them. When the service cannot be
    /// reached, `current` is returned unchanged alongside an error diagnostic.
    pub async fn read(
        &self,
        current: &TokenState,
        diagnostics: &mut Diagnostics,
    ) -> Option<TokenState> {
        let Some(session) = self.open_session(diagnostics).await else {
            return Some(current.clone());
        };

        let refreshed = self
            .read_in_session(session.as_ref(), current, diagnostics)
            .await;

        release(session).await;

        refreshed
    }

    async fn read_in_session(
        &self,
        session: &dyn TokenSession,
        current: &TokenState,
        diagnostics: &mut Diagnostics,
    ) -> Option<TokenState> {
        match session.token_by_name(&current.name).await {
            Ok(record) => {
                Some(TokenState::from_record(record, self.clock.today()).with_access_of(current))
            }
            Err(RemoteError::NotFound) => {
                diagnostics.add_warning(format!(
                    "token `{}` not found, but that's ok",
                    current.name
                ));

                None
            }
            Err(error) => {
                diagnostics.add_error_with_detail(
                    format!("failed to read token `{}`", current.name),
                    error.to_string(),
                );

                Some(current.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        clock::FixedClock,
        diagnostics::Severity,
        remote::{MockSessionProvider, MockTokenSession, RemoteExpiry, TokenRecord},
        state::TokenId,
        value::Value,
    };

    use super::*;

    fn reconciler(session: MockTokenSession) -> TokenReconciler<MockSessionProvider, FixedClock> {
        let mut sessions = MockSessionProvider::new();
        let session: Box<dyn TokenSession> = Box::new(session);

        sessions.expect_open().once().return_once(move || Ok(session));

        TokenReconciler::with_clock(sessions, FixedClock(date(2026, 10, 16)))
    }

    fn current() -> TokenState {
        TokenState {
            id: Value::Known(TokenId::new(11)),
            name: "ci-token".to_string(),
            expires: date(2026, 10, 17),
            select_repositories: ["org/repo1".to_string()].into(),
            read_permissions: ["contents".to_string()].into(),
            write_permissions: BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn missing_token_drops_state_with_one_warning() {
        let mut session = MockTokenSession::new();

        session
            .expect_token_by_name()
            .once()
            .return_once(|_| Err(RemoteError::NotFound));
        session.expect_close().once().return_once(|| Ok(()));

        let mut diagnostics = Diagnostics::new();

        let state = reconciler(session).read(&current(), &mut diagnostics).await;

        assert_eq!(state, None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.severity),
            Some(Severity::Warning)
        );
    }

    #[tokio::test]
    async fn refresh_keeps_local_access_and_takes_remote_expiry() -> TestResult {
        let mut session = MockTokenSession::new();

        session
            .expect_token_by_name()
            .once()
            .withf(|name| name == "ci-token")
            .return_once(|_| {
                Ok(TokenRecord {
                    id: TokenId::new(11),
                    name: "ci-token".to_string(),
                    expires: RemoteExpiry::On(date(2026, 11, 30)),
                })
            });
        session.expect_close().once().return_once(|| Ok(()));

        let mut diagnostics = Diagnostics::new();

        let state = reconciler(session)
            .read(&current(), &mut diagnostics)
            .await
            .ok_or("expected refreshed state")?;

        assert_eq!(state.expires, date(2026, 11, 30));
        assert_eq!(state.select_repositories, current().select_repositories);
        assert_eq!(state.read_permissions, current().read_permissions);
        assert!(diagnostics.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_dated_yesterday() -> TestResult {
        let mut session = MockTokenSession::new();

        session.expect_token_by_name().once().return_once(|_| {
            Ok(TokenRecord {
                id: TokenId::new(11),
                name: "ci-token".to_string(),
                expires: RemoteExpiry::Expired,
            })
        });
        session.expect_close().once().return_once(|| Ok(()));

        let mut diagnostics = Diagnostics::new();

        let state = reconciler(session)
            .read(&current(), &mut diagnostics)
            .await
            .ok_or("expected refreshed state")?;

        assert_eq!(state.expires, date(2026, 10, 15));
        assert!(!diagnostics.has_errors());

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_service_keeps_current_state() {
        let mut session = MockTokenSession::new();

        session.expect_token_by_name().once().return_once(|_| {
            Err(RemoteError::UnexpectedResponse("status 502".to_string()))
        });
        session
            .expect_close()
            .once()
            .return_once(|| Err(RemoteError::UnexpectedResponse("status 502".to_string())));

        let mut diagnostics = Diagnostics::new();

        let state = reconciler(session).read(&current(), &mut diagnostics).await;

        assert_eq!(state, Some(current()));
        assert_eq!(diagnostics.errors().count(), 1);
    }

    #[tokio::test]
    async fn read_without_session_keeps_current_state() {
        let mut sessions = MockSessionProvider::new();

        sessions.expect_open().once().return_once(|| {
            Err(RemoteError::UnexpectedResponse("status 503".to_string()))
        });

        let reconciler = TokenReconciler::with_clock(sessions, FixedClock(date(2026, 10, 16)));
        let mut diagnostics = Diagnostics::new();

        let state = reconciler.read(&current(), &mut diagnostics).await;

        assert_eq!(state, Some(current()));
        assert_eq!(diagnostics.errors().count(), 1);
        assert_eq!(diagnostics.len(), 1);
    }
}
