//! githubtok
//!
//! Reconciles declaratively configured, repository-scoped access tokens
//! against a remote token service, following a plan, diff and apply
//! lifecycle. A token can never be changed in place: any difference in its
//! name, expiry, scope or permissions replaces it.

pub mod clock;
pub mod defaults;
pub mod diagnostics;
pub mod diff;
pub mod permissions;
pub mod prelude;
pub mod reconcile;
pub mod remote;
pub mod state;
pub mod validation;
pub mod value;
