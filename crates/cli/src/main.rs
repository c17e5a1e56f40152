//! # Exception Reporter CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration inspection
//! - Panic and manual-report demos against the configured sinks

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_panic, run_report};

fn main() -> Result<()> {
    exception_reporter::designate_main_thread();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Exception Reporter CLI starting"
    );

    let result = match &cli.command {
        Commands::Info(args) => run_info(args),
        Commands::Panic(args) => run_panic(args),
        Commands::Report(args) => run_report(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: (cli.metrics_port != 0).then_some(cli.metrics_port),
        default_log_level: default_log_level.to_string(),
    })
}
