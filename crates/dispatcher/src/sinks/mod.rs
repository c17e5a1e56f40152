//! Sink implementations
//!
//! Contains FileSink and NetworkSink, plus the closed `Sink` set that
//! `create_sinks` builds from configuration.

mod file;
mod network;

pub use self::file::{render_text, FileSink};
pub use self::network::{NetworkSink, HTTP_TIMEOUT};

use config_loader::ReportingConfig;
use contracts::{ContractError, ExceptionPayload, ReportSink};
use tracing::{debug, instrument};

use crate::error::DispatcherError;

/// Every sink variant the configuration can select
#[derive(Debug, Clone)]
pub enum Sink {
    File(FileSink),
    Network(NetworkSink),
}

impl ReportSink for Sink {
    fn name(&self) -> &str {
        match self {
            Self::File(sink) => sink.name(),
            Self::Network(sink) => sink.name(),
        }
    }

    fn send(&self, payload: &ExceptionPayload) -> Result<(), ContractError> {
        match self {
            Self::File(sink) => sink.send(payload),
            Self::Network(sink) => sink.send(payload),
        }
    }
}

impl From<FileSink> for Sink {
    fn from(sink: FileSink) -> Self {
        Self::File(sink)
    }
}

impl From<NetworkSink> for Sink {
    fn from(sink: NetworkSink) -> Self {
        Self::Network(sink)
    }
}

/// Build the sinks a configuration selects: file first, then network
#[instrument(
    name = "create_sinks",
    skip(config),
    fields(selection = %config.sink_selection())
)]
pub fn create_sinks(config: &ReportingConfig) -> Result<Vec<Sink>, DispatcherError> {
    let mut sinks = Vec::with_capacity(2);

    if config.use_file_sink() {
        let sink = FileSink::new(config.log_file())
            .map_err(|e| DispatcherError::sink_creation("file", e.to_string()))?;
        sinks.push(Sink::File(sink));
    }

    if config.use_http_sink() {
        sinks.push(Sink::Network(NetworkSink::new(config.http_endpoint())));
    }

    debug!(count = sinks.len(), "Sinks created");
    Ok(sinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_loader::SinkSelection;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn config(selection: SinkSelection, log_file: PathBuf) -> ReportingConfig {
        ReportingConfig::new(
            Some(true),
            Some(selection),
            Some("http://127.0.0.1:9/exception".to_string()),
            Some(log_file),
        )
    }

    #[test]
    fn test_both_is_file_then_network() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("exceptions.log");

        let sinks = create_sinks(&config(SinkSelection::Both, log_file.clone())).unwrap();

        assert_eq!(sinks.len(), 2);
        match &sinks[0] {
            Sink::File(file) => assert_eq!(file.path(), log_file),
            other => panic!("expected file sink first, got {other:?}"),
        }
        match &sinks[1] {
            Sink::Network(net) => assert_eq!(net.endpoint(), "http://127.0.0.1:9/exception"),
            other => panic!("expected network sink second, got {other:?}"),
        }
    }

    #[test]
    fn test_single_selections() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("exceptions.log");

        let file_only = create_sinks(&config(SinkSelection::File, log_file.clone())).unwrap();
        assert!(matches!(file_only.as_slice(), [Sink::File(_)]));

        let http_only = create_sinks(&config(SinkSelection::Http, log_file)).unwrap();
        assert!(matches!(http_only.as_slice(), [Sink::Network(_)]));
    }

    #[test]
    fn test_http_only_creates_no_directories() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("nested").join("exceptions.log");

        create_sinks(&config(SinkSelection::Http, log_file)).unwrap();
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_unusable_directory_is_creation_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = create_sinks(&config(SinkSelection::File, blocker.join("exceptions.log")))
            .unwrap_err();
        assert!(matches!(err, DispatcherError::SinkCreation { .. }));
    }

    #[test]
    fn test_sink_names() {
        let dir = tempdir().unwrap();
        let sinks = create_sinks(&config(SinkSelection::Both, dir.path().join("e.log"))).unwrap();
        let names: Vec<_> = sinks.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["file", "http"]);
    }
}
