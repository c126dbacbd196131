use std::path::PathBuf;

use clap::Args;
use githubtok::{
    diagnostics::Diagnostics,
    state::{TokenConfig, TokenState},
};

use super::{CommandError, conclude, files, offline_reconciler};

#[derive(Debug, Args)]
pub(crate) struct PlanArgs {
    /// Desired token configuration; omit to plan removal
    #[arg(long)]
    config: Option<PathBuf>,

    /// Currently recorded state, if the token is already managed
    #[arg(long)]
    state: Option<PathBuf>,

    /// Where to write the plan; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

pub(crate) fn run(args: PlanArgs) -> Result<(), CommandError> {
    let config: Option<TokenConfig> = files::read_optional(args.config.as_deref())?;
    let prior: Option<TokenState> = files::read_optional(args.state.as_deref())?;
    let reconciler = offline_reconciler();
    let mut diagnostics = Diagnostics::new();

    if let Some(config) = &config {
        reconciler.validate(config, &mut diagnostics);
    }

    if diagnostics.has_errors() {
        return conclude(&diagnostics);
    }

    let planned = reconciler.plan(prior.as_ref(), config.as_ref(), &mut diagnostics);

    conclude(&diagnostics)?;

    if let Some(planned) = planned {
        files::write_document(args.out.as_deref(), &planned)?;
    }

    Ok(())
}
