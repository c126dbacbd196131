use async_trait::async_trait;
use clap::{Parser, Subcommand};
use githubtok::{
    diagnostics::Diagnostics,
    reconcile::TokenReconciler,
    remote::{RemoteError, SessionProvider, TokenSession},
};
use githubtok_app::{
    client::HttpSessionProvider,
    config::{LoggingConfig, ServiceArgs},
};

mod apply;
mod errors;
mod files;
mod import;
mod plan;
mod read;
mod report;
mod upgrade;
mod validate;

pub(crate) use errors::CommandError;

#[derive(Debug, Parser)]
#[command(
    name = "githubtok",
    about = "Plan and apply repository-scoped access tokens",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check a token configuration without contacting the token service
    Validate(validate::ValidateArgs),
    /// Compute the change needed to reach a configuration
    Plan(plan::PlanArgs),
    /// Carry out a planned change against the token service
    Apply(apply::ApplyArgs),
    /// Refresh recorded state from the token service
    Read(read::ReadArgs),
    /// Start tracking an existing token by its id
    Import(import::ImportArgs),
    /// Migrate recorded state to the current layout
    Upgrade(upgrade::UpgradeArgs),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), CommandError> {
        match self.command {
            Commands::Validate(args) => validate::run(args),
            Commands::Plan(args) => plan::run(args),
            Commands::Apply(args) => apply::run(args).await,
            Commands::Read(args) => read::run(args).await,
            Commands::Import(args) => import::run(args).await,
            Commands::Upgrade(args) => upgrade::run(args),
        }
    }
}

/// Session provider for commands that never reach the token service.
#[derive(Debug)]
struct Offline;

#[async_trait]
impl SessionProvider for Offline {
    async fn open(&self) -> Result<Box<dyn TokenSession>, RemoteError> {
        Err(RemoteError::UnexpectedResponse(
            "this command does not contact the token service".to_string(),
        ))
    }
}

fn offline_reconciler() -> TokenReconciler<Offline> {
    TokenReconciler::new(Offline)
}

fn online_reconciler(
    service: ServiceArgs,
) -> Result<TokenReconciler<HttpSessionProvider>, CommandError> {
    let sessions = HttpSessionProvider::new(service.into_service_config())?;

    Ok(TokenReconciler::new(sessions))
}

/// Print recorded diagnostics and fail when any of them is an error.
fn conclude(diagnostics: &Diagnostics) -> Result<(), CommandError> {
    report::print(diagnostics);

    if diagnostics.has_errors() {
        return Err(CommandError::Diagnostics(diagnostics.errors().count()));
    }

    Ok(())
}
