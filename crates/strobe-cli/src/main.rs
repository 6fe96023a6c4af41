//! strobe CLI - browse an incremental, deduplicating photo feed.
//!
//! This is the entry point for the `strobe` command-line interface. Command
//! implementations live in separate modules; this file handles argument
//! parsing, logging setup, and exit-code mapping.

use anyhow::Result;
use clap::Parser;
use strobe_core::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(&cli) {
        eprintln!("failed to initialize logging: {e}");
        std::process::exit(1);
    }

    match execute_command(cli).await {
        Ok(()) => {},
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(exit_code(&e));
        },
    }
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn execute_command(cli: Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Browse { pages, json } => commands::browse(&config, pages, json).await,
        Commands::Check => commands::check(&config).await,
    }
}

/// Configuration faults exit 2 so shell scripts can tell a provisioning
/// problem from a failed load (exit 1).
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<Error>() {
        Some(Error::Config(_)) => 2,
        _ => 1,
    }
}
