//! CLI entry point - the composition root.
//!
//! The only place where configuration, the supervisor runtime and
//! command dispatch are wired together.

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sitectl_cli::{Cli, Commands, handlers};
use sitectl_core::SiteConfig;
use sitectl_runtime::Supervisor;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = SiteConfig::load(&cli.config).with_context(|| {
        format!(
            "could not load {} (pass --config or set SITECTL_CONFIG)",
            cli.config.display()
        )
    })?;
    debug!(config = %cli.config.display(), worker = %config.command, "configuration loaded");

    match command {
        Commands::Start => {
            handlers::start::execute(&Supervisor::new(config)).await?;
        }
        Commands::Stop => {
            handlers::stop::execute(&Supervisor::new(config)).await?;
        }
        Commands::Status => {
            handlers::status::execute(&Supervisor::new(config)).await?;
        }
        Commands::Paths => {
            handlers::paths::execute(&cli.config, &config)?;
        }
    }

    Ok(())
}
