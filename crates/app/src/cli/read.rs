use std::path::PathBuf;

use clap::Args;
use githubtok::{diagnostics::Diagnostics, state::TokenState};
use githubtok_app::config::ServiceArgs;

use super::{CommandError, conclude, files, online_reconciler};

#[derive(Debug, Args)]
pub(crate) struct ReadArgs {
    /// Currently recorded state
    #[arg(long)]
    state: PathBuf,

    /// Where to write the refreshed state; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    service: ServiceArgs,
}

pub(crate) async fn run(args: ReadArgs) -> Result<(), CommandError> {
    let current: Option<TokenState> = files::read_optional(Some(&args.state))?;

    // Nothing is tracked, so there is nothing to refresh
    let Some(current) = current else {
        return files::write_document(args.out.as_deref(), &None::<TokenState>);
    };

    let reconciler = online_reconciler(args.service)?;
    let mut diagnostics = Diagnostics::new();

    let refreshed = reconciler.read(&current, &mut diagnostics).await;

    files::write_document(args.out.as_deref(), &refreshed)?;

    conclude(&diagnostics)
}
