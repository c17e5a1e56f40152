//! `panic` command implementation.

use anyhow::{Context, Result};
use std::thread;
use tracing::{info, warn};

use crate::cli::PanicArgs;

/// Execute the `panic` command
///
/// On the main thread this never returns: the panic unwinds out of `main`
/// after the reporter and std's hook have run.
pub fn run_panic(args: &PanicArgs) -> Result<()> {
    exception_reporter::enable(args.reporting.to_options())
        .context("Failed to enable exception reporting")?;
    info!(
        reporting = exception_reporter::is_enabled(),
        worker = args.worker,
        "Triggering panic"
    );

    if !args.worker {
        panic!("{}", args.message);
    }

    let message = args.message.clone();
    let outcome = thread::Builder::new()
        .name("demo-worker".to_string())
        .spawn(move || panic!("{message}"))
        .context("Failed to spawn worker thread")?
        .join();

    if outcome.is_err() {
        warn!("Worker thread panicked");
    }

    exception_reporter::disable();
    Ok(())
}
