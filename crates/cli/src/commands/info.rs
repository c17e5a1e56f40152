//! `info` command implementation.

use anyhow::{Context, Result};
use exception_reporter::{ReportingConfig, ENV_VAR_NAME};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    explicit_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env_value: Option<String>,
    sink: String,
    http_endpoint: Option<String>,
    log_file: Option<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config = args.reporting.to_options().to_config();
    info!(selection = %config.sink_selection(), "Resolved reporting configuration");

    let summary = build_config_info(&config);
    if args.json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize config info")?;
        println!("{json}");
    } else {
        print_config_info(&summary);
    }

    Ok(())
}

fn build_config_info(config: &ReportingConfig) -> ConfigInfo {
    ConfigInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        enabled: config.enabled(),
        explicit_enabled: config.explicit_enabled(),
        env_value: std::env::var(ENV_VAR_NAME).ok(),
        sink: config.sink_selection().to_string(),
        http_endpoint: config
            .use_http_sink()
            .then(|| config.http_endpoint().to_string()),
        log_file: config
            .use_file_sink()
            .then(|| config.log_file().display().to_string()),
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("Exception Reporter v{}", info.version);
    println!();
    println!("  Enabled:       {}", info.enabled);
    match (info.explicit_enabled, &info.env_value) {
        (Some(true), _) => println!("  Source:        --enabled"),
        (Some(false), _) => println!("  Source:        --disabled"),
        (None, Some(value)) => println!("  Source:        {ENV_VAR_NAME}={value}"),
        (None, None) => println!("  Source:        {ENV_VAR_NAME} unset"),
    }
    println!("  Sinks:         {}", info.sink);
    if let Some(path) = &info.log_file {
        println!("  Log file:      {path}");
    }
    if let Some(endpoint) = &info.http_endpoint {
        println!("  HTTP endpoint: {endpoint}");
    }
}
