//! Planning.

use tracing::debug;

use crate::{
    clock::Clock,
    defaults,
    diagnostics::Diagnostics,
    diff::{self, Change, ReplaceAttributes},
    reconcile::{PlannedAction, PlannedChange, TokenReconciler},
    remote::SessionProvider,
    state::{TokenConfig, TokenState},
    value::Value,
};

impl<P: SessionProvider, C: Clock> TokenReconciler<P, C> {
    /// Plan the change from `prior` to `config` without touching the token
    /// service.
    ///
    /// A missing `config` plans a removal. The planned `id` is `Unknown`
    /// whenever apply will have to create a token. Returns `None` only when
    /// the configuration cannot be planned; the reason is recorded in
    /// `diagnostics`.
    pub fn plan(
        &self,
        prior: Option<&TokenState>,
        config: Option<&TokenConfig>,
        diagnostics: &mut Diagnostics,
    ) -> Option<PlannedChange> {
        let Some(config) = config else {
            let action = if prior.is_some() {
                PlannedAction::Delete
            } else {
                PlannedAction::NoOp
            };

            return Some(PlannedChange {
                action,
                state: None,
                requires_replace: ReplaceAttributes::new(),
            });
        };

        let mut state = match defaults::resolve(config, self.clock.today()) {
            Ok(state) => state,
            Err(error) => {
                diagnostics.add_attribute_error(error.0, error.to_string());

                return None;
            }
        };

        let Some(prior) = prior else {
            debug!(name = %state.name, "planning token creation");

            state.id = Value::Unknown;

            return Some(PlannedChange {
                action: PlannedAction::Create,
                state: Some(state),
                requires_replace: ReplaceAttributes::new(),
            });
        };

        // A prior that never received an id has nothing to destroy
        if !prior.id.is_known() {
            debug!(name = %state.name, "prior token was never created, planning creation");

            state.id = Value::Unknown;

            return Some(PlannedChange {
                action: PlannedAction::Create,
                state: Some(state),
                requires_replace: ReplaceAttributes::new(),
            });
        }

        match diff::classify(prior, &state) {
            Change::Replace(attributes) => {
                debug!(name = %state.name, ?attributes, "planning token replacement");

                state.id = Value::Unknown;

                Some(PlannedChange {
                    action: PlannedAction::Replace,
                    state: Some(state),
                    requires_replace: attributes,
                })
            }
            Change::NoChange => {
                state.id.clone_from(&prior.id);

                Some(PlannedChange {
                    action: PlannedAction::NoOp,
                    state: Some(state),
                    requires_replace: ReplaceAttributes::new(),
                })
            }
        }
    }
}
