use std::path::PathBuf;

use clap::Args;
use githubtok::{
    clock::Clock,
    diagnostics::Diagnostics,
    reconcile::{PlannedAction, PlannedChange, TokenReconciler},
    remote::SessionProvider,
    state::TokenState,
};
use githubtok_app::config::ServiceArgs;
use tracing::info;

use super::{CommandError, conclude, files, online_reconciler};

#[derive(Debug, Args)]
pub(crate) struct ApplyArgs {
    /// Plan document written by `plan`
    #[arg(long)]
    plan: PathBuf,

    /// Currently recorded state, if the token is already managed
    #[arg(long)]
    state: Option<PathBuf>,

    /// Where to write the resulting state; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    service: ServiceArgs,
}

pub(crate) async fn run(args: ApplyArgs) -> Result<(), CommandError> {
    let planned: PlannedChange = files::read_document(&args.plan)?;
    let prior: Option<TokenState> = files::read_optional(args.state.as_deref())?;
    let reconciler = online_reconciler(args.service)?;
    let mut diagnostics = Diagnostics::new();

    let next = apply_plan(&reconciler, prior.as_ref(), &planned, &mut diagnostics).await?;

    // State is written even when errors were recorded so nothing is lost
    files::write_document(args.out.as_deref(), &next)?;
    conclude(&diagnostics)?;

    info!(action = ?planned.action, "plan applied");

    Ok(())
}

/// Carry out `planned` starting from `prior`.
///
/// A replacement destroys the prior token first so the new one can take its
/// name, and stops there if the destroy did not go through.
async fn apply_plan<P, C>(
    reconciler: &TokenReconciler<P, C>,
    prior: Option<&TokenState>,
    planned: &PlannedChange,
    diagnostics: &mut Diagnostics,
) -> Result<Option<TokenState>, CommandError>
where
    P: SessionProvider,
    C: Clock,
{
    let next = match (planned.action, planned.state.as_ref()) {
        (PlannedAction::Delete, _) => reconciler.apply(prior, None, diagnostics).await?,
        (PlannedAction::Replace, Some(state)) => {
            let remaining = reconciler.apply(prior, None, diagnostics).await?;

            if remaining.is_some() {
                remaining
            } else {
                reconciler.apply(None, Some(state), diagnostics).await?
            }
        }
        (PlannedAction::Create | PlannedAction::NoOp, Some(state)) => {
            reconciler.apply(prior, Some(state), diagnostics).await?
        }
        (PlannedAction::NoOp, None) => None,
        (PlannedAction::Create, None) => {
            return Err(CommandError::IncompletePlan { action: "create" });
        }
        (PlannedAction::Replace, None) => {
            return Err(CommandError::IncompletePlan { action: "replace" });
        }
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use githubtok::{
        clock::FixedClock,
        diff::ReplaceAttributes,
        remote::{
            MockSessionProvider, MockTokenSession, RemoteError, RemoteExpiry, TokenRecord,
            TokenSecret, TokenSession,
        },
        state::{TokenAttribute, TokenId},
        value::Value,
    };
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn prior() -> TokenState {
        TokenState {
            id: Value::Known(TokenId::new(7)),
            name: "ci-token".to_string(),
            expires: date(2027, 1, 1),
            select_repositories: ["org/repo1".to_string()].into(),
            read_permissions: ["contents".to_string()].into(),
            write_permissions: Default::default(),
        }
    }

    fn replacement() -> PlannedChange {
        PlannedChange {
            action: PlannedAction::Replace,
            state: Some(TokenState {
                id: Value::Unknown,
                name: "ci-token-v2".to_string(),
                ..prior()
            }),
            requires_replace: ReplaceAttributes::from_slice(&[TokenAttribute::Name]),
        }
    }

    /// Provider handing out `sessions` in order, one per open.
    fn provider(mut sessions: Vec<MockTokenSession>) -> MockSessionProvider {
        let count = sessions.len();

        sessions.reverse();

        let queue: Mutex<Vec<Box<dyn TokenSession>>> = Mutex::new(
            sessions
                .into_iter()
                .map(|session| Box::new(session) as Box<dyn TokenSession>)
                .collect(),
        );

        let mut provider = MockSessionProvider::new();

        provider.expect_open().times(count).returning(move || {
            queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop()
                .ok_or_else(|| RemoteError::UnexpectedResponse("no session left".to_string()))
        });

        provider
    }

    #[tokio::test]
    async fn replace_destroys_before_creating() -> TestResult {
        let mut destroy = MockTokenSession::new();

        destroy
            .expect_delete_token()
            .once()
            .withf(|id| *id == TokenId::new(7))
            .return_once(|_| Ok(()));
        destroy.expect_create_token().never();
        destroy.expect_close().once().return_once(|| Ok(()));

        let mut create = MockTokenSession::new();

        create.expect_delete_token().never();
        create
            .expect_create_token()
            .once()
            .withf(|request| request.name == "ci-token-v2")
            .return_once(|_| Ok(TokenSecret::new("github_pat_v2")));
        create.expect_token_by_name().once().return_once(|_| {
            Ok(TokenRecord {
                id: TokenId::new(8),
                name: "ci-token-v2".to_string(),
                expires: RemoteExpiry::On(date(2027, 1, 1)),
            })
        });
        create.expect_close().once().return_once(|| Ok(()));

        let reconciler = TokenReconciler::with_clock(
            provider(vec![destroy, create]),
            FixedClock(date(2026, 10, 16)),
        );
        let mut diagnostics = Diagnostics::new();

        let next = apply_plan(&reconciler, Some(&prior()), &replacement(), &mut diagnostics)
            .await?
            .ok_or("expected replacement state")?;

        assert_eq!(next.id, Value::Known(TokenId::new(8)));
        assert_eq!(next.name, "ci-token-v2");
        assert!(!diagnostics.has_errors());

        Ok(())
    }

    #[tokio::test]
    async fn failed_destroy_skips_the_create() -> TestResult {
        let mut destroy = MockTokenSession::new();

        destroy.expect_delete_token().once().return_once(|_| {
            Err(RemoteError::UnexpectedResponse("status 500".to_string()))
        });
        destroy.expect_create_token().never();
        destroy.expect_close().once().return_once(|| Ok(()));

        let reconciler = TokenReconciler::with_clock(
            provider(vec![destroy]),
            FixedClock(date(2026, 10, 16)),
        );
        let mut diagnostics = Diagnostics::new();

        let next = apply_plan(&reconciler, Some(&prior()), &replacement(), &mut diagnostics).await?;

        assert_eq!(next, Some(prior()));
        assert_eq!(diagnostics.errors().count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_plan_without_state_is_rejected() {
        let reconciler = TokenReconciler::with_clock(provider(Vec::new()), FixedClock(date(2026, 10, 16)));
        let mut diagnostics = Diagnostics::new();
        let planned = PlannedChange {
            action: PlannedAction::Create,
            state: None,
            requires_replace: ReplaceAttributes::new(),
        };

        let result = apply_plan(&reconciler, None, &planned, &mut diagnostics).await;

        assert!(
            matches!(result, Err(CommandError::IncompletePlan { action: "create" })),
            "expected an incomplete plan error, got {result:?}"
        );
    }
}
