use std::path::PathBuf;

use clap::Args;
use githubtok::diagnostics::Diagnostics;
use githubtok_app::config::ServiceArgs;

use super::{CommandError, conclude, files, online_reconciler};

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// Remote id of the token to import
    #[arg(long)]
    id: String,

    /// Where to write the imported state; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    service: ServiceArgs,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), CommandError> {
    let reconciler = online_reconciler(args.service)?;
    let mut diagnostics = Diagnostics::new();

    let imported = reconciler.import(&args.id, &mut diagnostics).await?;

    files::write_document(args.out.as_deref(), &imported)?;

    conclude(&diagnostics)
}
