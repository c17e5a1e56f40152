//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use exception_reporter::{EnableOptions, SinkSelection};
use std::path::PathBuf;

/// Exception Reporter - forwards uncaught panics to an IDE-side listener
#[derive(Parser, Debug)]
#[command(
    name = "exception-reporter",
    author,
    version,
    about = "Demo driver for the process-wide exception reporter",
    long_about = "Enables exception reporting with the given sinks and then triggers \n\
                  a panic or a manual report so the output can be inspected.\n\n\
                  Reporting is off unless --enabled is passed or \n\
                  CURSOR_EXCEPTION_REPORTING is set to true/1/yes/on."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Prometheus metrics port (0 = disabled)
    #[arg(long, default_value = "0", global = true)]
    pub metrics_port: u16,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved reporting configuration
    Info(InfoArgs),

    /// Enable reporting, then panic
    Panic(PanicArgs),

    /// Enable reporting, then report an error by hand
    Report(ReportArgs),
}

/// Reporting options shared by every command
#[derive(Args, Debug, Clone)]
pub struct ReportingArgs {
    /// Sinks to report to
    #[arg(long, value_enum)]
    pub sink: Option<SinkArg>,

    /// HTTP endpoint for the http sink
    #[arg(long)]
    pub http_endpoint: Option<String>,

    /// Log file for the file sink
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Force reporting on
    #[arg(long, conflicts_with = "disabled")]
    pub enabled: bool,

    /// Force reporting off
    #[arg(long)]
    pub disabled: bool,
}

impl ReportingArgs {
    /// Explicit enabled flag, `None` when neither switch is given
    pub fn enabled_flag(&self) -> Option<bool> {
        match (self.enabled, self.disabled) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn to_options(&self) -> EnableOptions {
        EnableOptions {
            sink: self.sink.map(Into::into),
            http_endpoint: self.http_endpoint.clone(),
            log_file: self.log_file.clone(),
            enabled: self.enabled_flag(),
        }
    }
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub reporting: ReportingArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `panic` command
#[derive(Parser, Debug)]
pub struct PanicArgs {
    #[command(flatten)]
    pub reporting: ReportingArgs,

    /// Panic message
    #[arg(short, long, default_value = "demo panic")]
    pub message: String,

    /// Panic on a spawned worker thread instead of the main thread
    #[arg(long)]
    pub worker: bool,
}

/// Arguments for the `report` command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub reporting: ReportingArgs,

    /// Error message to report
    #[arg(short, long)]
    pub message: String,

    /// Optional scope tag
    #[arg(long)]
    pub scope: Option<String>,
}

/// Sink selection as a CLI value
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkArg {
    File,
    Http,
    Both,
}

impl From<SinkArg> for SinkSelection {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::File => SinkSelection::File,
            SinkArg::Http => SinkSelection::Http,
            SinkArg::Both => SinkSelection::Both,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
