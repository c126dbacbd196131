use std::{io, path::PathBuf};

use githubtok::{reconcile::ReconcileError, remote::RemoteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_norway::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("plan has action `{action}` but carries no state")]
    IncompletePlan { action: &'static str },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("{0} error diagnostic(s) recorded")]
    Diagnostics(usize),
}
