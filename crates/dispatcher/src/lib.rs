//! # Dispatcher
//!
//! Fan-out of exception reports to sinks.
//!
//! Responsibilities:
//! - Build one `ExceptionPayload` per report
//! - Deliver it to every sink in order
//! - Contain each sink's failure so the others still run and the caller never sees it

pub mod dispatcher;
pub mod error;
pub mod metrics;
mod reentry;
pub mod sinks;

pub use contracts::{ExceptionInfo, ExceptionPayload, ReportSink, ThreadInfo};
pub use dispatcher::{create_dispatcher, Dispatcher, DispatcherBuilder};
pub use error::DispatcherError;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{create_sinks, render_text, FileSink, NetworkSink, Sink, HTTP_TIMEOUT};
