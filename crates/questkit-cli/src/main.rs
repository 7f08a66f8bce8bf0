//! questkit binary entry point.
//!
//! A thin wrapper around questkit-formats that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Runs the requested subcommand

mod commands;
mod config;

use anyhow::Result;
use config::Cli;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // RUST_LOG wins over --log-level / QUESTKIT_LOG
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    tracing::debug!("Running {:?}", cli.command);

    let stdout = std::io::stdout();
    commands::run(&cli.command, &mut stdout.lock())
}
