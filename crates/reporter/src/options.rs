//! Options accepted by `enable`

use config_loader::{ReportingConfig, SinkSelection};
use std::path::PathBuf;

/// Parameters for [`crate::enable`]; every unset field takes its default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnableOptions {
    pub sink: Option<SinkSelection>,
    pub http_endpoint: Option<String>,
    pub log_file: Option<PathBuf>,
    /// `None` defers to `CURSOR_EXCEPTION_REPORTING`
    pub enabled: Option<bool>,
}

impl EnableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(mut self, sink: SinkSelection) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn http_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.http_endpoint = Some(endpoint.into());
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Resolve into a configuration
    pub fn to_config(&self) -> ReportingConfig {
        ReportingConfig::new(
            self.enabled,
            self.sink,
            self.http_endpoint.clone(),
            self.log_file.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_loader::{DEFAULT_HTTP_ENDPOINT, DEFAULT_LOG_FILE};
    use std::path::Path;

    #[test]
    fn test_defaults_resolve_like_config() {
        let config = EnableOptions::new().to_config();
        assert_eq!(config, ReportingConfig::default());
        assert_eq!(config.http_endpoint(), DEFAULT_HTTP_ENDPOINT);
        assert_eq!(config.log_file(), Path::new(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_builder_fields() {
        let config = EnableOptions::new()
            .sink(SinkSelection::Both)
            .http_endpoint("http://127.0.0.1:1/x")
            .log_file("/tmp/e.log")
            .enabled(false)
            .to_config();

        assert_eq!(config.sink_selection(), SinkSelection::Both);
        assert_eq!(config.http_endpoint(), "http://127.0.0.1:1/x");
        assert_eq!(config.log_file(), Path::new("/tmp/e.log"));
        assert_eq!(config.explicit_enabled(), Some(false));
    }
}
