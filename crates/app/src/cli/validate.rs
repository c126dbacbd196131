use std::path::PathBuf;

use clap::Args;
use githubtok::{diagnostics::Diagnostics, state::TokenConfig};
use tracing::info;

use super::{CommandError, conclude, files, offline_reconciler};

#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    /// Token configuration document (YAML or JSON)
    #[arg(long)]
    config: PathBuf,
}

pub(crate) fn run(args: ValidateArgs) -> Result<(), CommandError> {
    let config: TokenConfig = files::read_document(&args.config)?;
    let mut diagnostics = Diagnostics::new();

    offline_reconciler().validate(&config, &mut diagnostics);
    conclude(&diagnostics)?;

    info!(name = %config.name, "configuration is valid");

    Ok(())
}
