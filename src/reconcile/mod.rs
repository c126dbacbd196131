//! Reconciliation State Machine
//!
//! Drives a single token through plan, apply, read and import. No state is
//! kept between calls: every entry point works only from the prior state and
//! configuration it is given, and opens (then always closes) its own token
//! service session.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    clock::{Clock, SystemClock},
    diagnostics::Diagnostics,
    diff::ReplaceAttributes,
    remote::{SessionProvider, TokenSession},
    state::{SCHEMA_VERSION, TokenConfig, TokenState},
    validation,
};

mod apply;
mod errors;
mod import;
mod plan;
mod read;

pub use errors::ReconcileError;

/// What applying a plan will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedAction {
    /// Nothing to do.
    NoOp,

    /// Create a token that does not exist yet.
    Create,

    /// Destroy the existing token and create a new one.
    Replace,

    /// Destroy the existing token.
    Delete,
}

/// Result of planning a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedChange {
    /// Planned action.
    pub action: PlannedAction,

    /// Planned next state; `None` when the token is being removed.
    pub state: Option<TokenState>,

    /// Attributes that forced a replacement; empty unless replacing.
    pub requires_replace: ReplaceAttributes,
}

/// Token resource reconciler.
#[derive(Debug)]
pub struct TokenReconciler<P, C = SystemClock> {
    sessions: P,
    clock: C,
}

impl<P: SessionProvider> TokenReconciler<P> {
    /// Reconciler using the system clock.
    pub fn new(sessions: P) -> Self {
        Self::with_clock(sessions, SystemClock)
    }
}

impl<P: SessionProvider, C: Clock> TokenReconciler<P, C> {
    /// Reconciler using the given clock.
    pub fn with_clock(sessions: P, clock: C) -> Self {
        Self { sessions, clock }
    }

    /// Record an error diagnostic for every problem in `config`.
    pub fn validate(&self, config: &TokenConfig, diagnostics: &mut Diagnostics) {
        validation::validate(config, self.clock.today(), diagnostics);
    }

    /// Migrate state written by an older schema version.
    ///
    /// The layout has not changed since the first version.
    pub fn upgrade(&self, state: TokenState, version: u64) -> TokenState {
        debug!(version, current = SCHEMA_VERSION, "upgrading token state");

        state
    }

    async fn open_session(&self, diagnostics: &mut Diagnostics) -> Option<Box<dyn TokenSession>> {
        match self.sessions.open().await {
            Ok(session) => Some(session),
            Err(error) => {
                diagnostics.add_error_with_detail(
                    "failed to open token service session",
                    error.to_string(),
                );

                None
            }
        }
    }
}

async fn release(session: Box<dyn TokenSession>) {
    if let Err(error) = session.close().await {
        warn!("failed to release token service session: {error}");
    }
}
