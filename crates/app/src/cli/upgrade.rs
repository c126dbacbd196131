use std::path::PathBuf;

use clap::Args;
use githubtok::state::{SCHEMA_VERSION, TokenState};

use super::{CommandError, files, offline_reconciler};

#[derive(Debug, Args)]
pub(crate) struct UpgradeArgs {
    /// Recorded state to migrate
    #[arg(long)]
    state: PathBuf,

    /// Layout version the state was written with
    #[arg(long, default_value_t = SCHEMA_VERSION)]
    version: u64,

    /// Where to write the migrated state; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

pub(crate) fn run(args: UpgradeArgs) -> Result<(), CommandError> {
    let state: Option<TokenState> = files::read_optional(Some(&args.state))?;
    let reconciler = offline_reconciler();
    let upgraded = state.map(|state| reconciler.upgrade(state, args.version));

    files::write_document(args.out.as_deref(), &upgraded)
}
