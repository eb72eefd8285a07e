mod cli;
mod commands;
mod logging;

use clap::Parser as _;
use dotenvy::dotenv;
use tracing::{debug, error};

use crate::cli::{Cli, Commands};
use crate::logging::init_logging;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    init_logging()?;
    let cli = Cli::parse();
    debug!(command = ?cli.command, provider = %cli.storage.provider, "Parsed command line");

    if let Err(e) = run(cli).await {
        error!(
            error_type = commands::failure_type(&e),
            error = %e,
            error_chain = ?e,
            "Command failed"
        );
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> color_eyre::Result<()> {
    let registry = commands::provider_registry(&cli.storage);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Providers => commands::list_providers(&registry, &mut out),
        Commands::Site { command } => {
            let storage = registry.construct(&cli.storage.provider, &cli.storage.ca_url).await?;
            commands::run_site(storage.as_ref(), command, &mut out).await
        }
        Commands::User { command } => {
            let storage = registry.construct(&cli.storage.provider, &cli.storage.ca_url).await?;
            commands::run_user(storage.as_ref(), command, &mut out).await
        }
    }
}
