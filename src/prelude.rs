//! githubtok prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    clock::{Clock, FixedClock, SystemClock},
    diagnostics::{Diagnostic, Diagnostics, Severity},
    diff::{Change, ReplaceAttributes, classify},
    permissions::{Access, Permission, PermissionError},
    reconcile::{PlannedAction, PlannedChange, ReconcileError, TokenReconciler},
    remote::{
        NewToken, RemoteError, RemoteExpiry, RepositoryScope, SessionProvider, TokenRecord,
        TokenSecret, TokenSession,
    },
    state::{SCHEMA_VERSION, TokenAttribute, TokenConfig, TokenId, TokenState},
    value::Value,
};
