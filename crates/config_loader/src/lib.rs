//! # Config Loader
//!
//! Reporting configuration.
//!
//! Responsibilities:
//! - Resolve enabled/disabled from an explicit flag or `CURSOR_EXCEPTION_REPORTING`
//! - Select which sinks to build
//! - Supply the default endpoint and log path
//!
//! # Example
//!
//! ```
//! use config_loader::{ReportingConfig, SinkSelection};
//!
//! let config = ReportingConfig::new(Some(true), Some(SinkSelection::Both), None, None);
//! assert!(config.enabled());
//! assert_eq!(config.http_endpoint(), "http://localhost:7331/exception");
//! ```

mod env;
mod selection;

pub use env::{enabled_from_env, is_truthy, ENV_VAR_NAME};
pub use selection::SinkSelection;

use std::path::{Path, PathBuf};

/// Default HTTP sink endpoint
pub const DEFAULT_HTTP_ENDPOINT: &str = "http://localhost:7331/exception";

/// Default file sink path, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = ".cursor/exceptions.log";

/// Resolved reporting configuration
///
/// Immutable after construction. Only `enabled` may consult the environment,
/// and only when no explicit flag was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingConfig {
    enabled: Option<bool>,
    sink_selection: SinkSelection,
    http_endpoint: String,
    log_file: PathBuf,
}

impl ReportingConfig {
    /// Create a configuration, filling unset fields with defaults
    pub fn new(
        enabled: Option<bool>,
        sink_selection: Option<SinkSelection>,
        http_endpoint: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        Self {
            enabled,
            sink_selection: sink_selection.unwrap_or_default(),
            http_endpoint: http_endpoint
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_HTTP_ENDPOINT.to_string()),
            log_file: log_file
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    /// Whether reporting is enabled.
    ///
    /// An explicit flag always wins; otherwise the environment variable is
    /// read on every call.
    pub fn enabled(&self) -> bool {
        match self.enabled {
            Some(explicit) => explicit,
            None => enabled_from_env(),
        }
    }

    /// The explicit flag, if one was given
    pub fn explicit_enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn sink_selection(&self) -> SinkSelection {
        self.sink_selection
    }

    pub fn http_endpoint(&self) -> &str {
        &self.http_endpoint
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Whether a file sink should be built
    pub fn use_file_sink(&self) -> bool {
        self.sink_selection.includes_file()
    }

    /// Whether an HTTP sink should be built
    pub fn use_http_sink(&self) -> bool {
        self.sink_selection.includes_http()
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}
