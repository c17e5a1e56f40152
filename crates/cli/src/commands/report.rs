//! `report` command implementation.

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use crate::cli::ReportArgs;

/// Error reported by the demo
#[derive(Debug, Error)]
#[error("{message}")]
struct DemoError {
    message: String,
}

/// Execute the `report` command
pub fn run_report(args: &ReportArgs) -> Result<()> {
    exception_reporter::enable(args.reporting.to_options())
        .context("Failed to enable exception reporting")?;

    let error = DemoError {
        message: args.message.clone(),
    };
    exception_reporter::report_error(&error, args.scope.as_deref());
    info!(
        delivered = exception_reporter::is_enabled(),
        "Manual report issued"
    );

    exception_reporter::disable();
    Ok(())
}
