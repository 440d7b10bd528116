use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bp_tracker_cli::{run, Cli};
use bp_tracker_domain::services::create_default_reading_service;

/// The main entry point for the bp-tracker command line
///
/// Loads `.env`, installs logging, opens the configured store and runs the
/// requested command. Validation failures exit with code 2.
fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli
        .storage_config()
        .context("Invalid storage configuration")?;
    debug!("Using {} storage", config.backend);

    let mut service =
        create_default_reading_service(&config).context("Failed to open reading storage")?;

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let outcome = run(&cli.command, &mut service, &mut input, &mut out)?;

    Ok(outcome.exit_code())
}

/// Logs go to stderr so command output stays clean.
/// `RUST_LOG` applies unless `-v` is given.
fn init_tracing(verbose: u8) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(env_filter)
        .init();
}
