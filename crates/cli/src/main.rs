//! pve-provider - operator CLI for the Proxmox VE provider core.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Show the configuration schema and the registered resource names.
//! - Check that a configuration resolves and authenticates.
//!
//! Does NOT handle:
//! - Configuration validation or client construction (see `crates/config`, `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` values act like the environment.
//! - Exit codes follow `error::ExitCode`.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use pve_config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so it can provide PM_* values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let exit_code = match run_command(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
