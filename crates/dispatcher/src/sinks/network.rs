//! NetworkSink - HTTP POST of JSON reports

use contracts::{ContractError, ExceptionPayload, ReportSink};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::thread;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::reentry::ReentryGuard;

/// Fixed request timeout; bounds how long a reporting thread can stall
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(1);

/// Sink that POSTs each report as JSON
#[derive(Debug, Clone)]
pub struct NetworkSink {
    name: String,
    endpoint: String,
    timeout: Duration,
}

impl NetworkSink {
    /// Create a new NetworkSink.
    ///
    /// The URL is not checked here; a malformed one fails on `send`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            name: "http".to_string(),
            endpoint: endpoint.into(),
            timeout: HTTP_TIMEOUT,
        }
    }

    /// Override the sink name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Target endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn post(&self, body: String) -> Result<(), ContractError> {
        let connection_error =
            |e: reqwest::Error| ContractError::sink_connection(&self.name, e.to_string());

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(connection_error)?;

        let response = client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(connection_error)?;

        let status = response.status();
        // Drain so the connection closes cleanly; content is not interpreted
        let bytes = response.bytes().map_err(connection_error)?;

        debug!(
            sink = %self.name,
            status = status.as_u16(),
            response_bytes = bytes.len(),
            "Report posted"
        );
        Ok(())
    }
}

impl ReportSink for NetworkSink {
    fn name(&self) -> &str {
        &self.name
    }

    /// Runs the blocking request on a scoped helper thread: reqwest's
    /// blocking client panics when used from inside an async runtime, and a
    /// panic hook can fire on a runtime worker.
    #[instrument(
        name = "network_sink_send",
        skip(self, payload),
        fields(sink = %self.name, endpoint = %self.endpoint)
    )]
    fn send(&self, payload: &ExceptionPayload) -> Result<(), ContractError> {
        let body = payload.to_json_pretty()?;

        thread::scope(|scope| {
            let worker = thread::Builder::new()
                .name("exception-report-http".to_string())
                .spawn_scoped(scope, move || {
                    let _guard = ReentryGuard::enter();
                    self.post(body)
                })
                .map_err(|e| ContractError::sink_connection(&self.name, e.to_string()))?;

            worker
                .join()
                .map_err(|_| ContractError::sink_connection(&self.name, "request thread panicked"))?
        })
    }
}
