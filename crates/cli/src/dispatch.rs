//! Command dispatch.
//!
//! Responsibilities:
//! - Build the provider registry and, for `check`, the resolved configuration.
//! - Initialize logging from the resolved logging settings.
//! - Route to the command implementation and print its output.

use anyhow::{Context, Result};
use pve_config::{Config, ConfigLoader, LoggingConfig};
use pve_provider::logging::{self, LogGuard};

use crate::args::{Cli, Commands};
use crate::commands;

pub async fn run_command(cli: Cli) -> Result<()> {
    let registry = pve_provider::provider()?;
    let output = cli.output;

    let rendered = match &cli.command {
        Commands::Schema => {
            let _guard = init_logging(&LoggingConfig::default(), &cli)?;
            commands::schema::run(registry.schema(), output)?
        }
        Commands::Resources => {
            let _guard = init_logging(&LoggingConfig::default(), &cli)?;
            commands::resources::run(&registry, output)?
        }
        Commands::Check => {
            let config = resolve_config(&cli)?;
            let _guard = init_logging(&config.logging, &cli)?;
            commands::check::run(&config, output).await?
        }
    };

    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Flags first, then `PM_*` variables for anything still unset.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let loader = cli.connection.apply(ConfigLoader::new())?;
    Ok(loader.from_env()?.build()?)
}

fn init_logging(config: &LoggingConfig, cli: &Cli) -> Result<LogGuard> {
    logging::init(config, cli.log_format.into()).context("failed to initialize logging")
}
