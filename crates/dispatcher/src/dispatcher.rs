//! Dispatcher - fan-out of one report to every sink

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use config_loader::ReportingConfig;
use contracts::{ExceptionInfo, ExceptionPayload, ReportSink, ThreadInfo};
use tracing::{debug, info, instrument, warn};

use crate::error::DispatcherError;
use crate::metrics::{record_delivery, record_report, MetricsSnapshot, SinkMetrics};
use crate::reentry::ReentryGuard;
use crate::sinks::create_sinks;

/// Builder for creating a Dispatcher
pub struct DispatcherBuilder {
    config: ReportingConfig,
    sinks: Vec<Box<dyn ReportSink>>,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(config: ReportingConfig) -> Self {
        Self {
            config,
            sinks: Vec::new(),
        }
    }

    /// Append one sink
    pub fn sink<S: ReportSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Append several sinks, keeping their order
    pub fn sinks<S, I>(mut self, sinks: I) -> Self
    where
        S: ReportSink + 'static,
        I: IntoIterator<Item = S>,
    {
        self.sinks
            .extend(sinks.into_iter().map(|s| Box::new(s) as Box<dyn ReportSink>));
        self
    }

    /// Build the dispatcher (initially disabled)
    pub fn build(self) -> Dispatcher {
        let sinks = self
            .sinks
            .into_iter()
            .map(|sink| SinkEntry {
                sink,
                metrics: SinkMetrics::new(),
            })
            .collect();

        Dispatcher {
            config: self.config,
            sinks,
            enabled: AtomicBool::new(false),
        }
    }
}

struct SinkEntry {
    sink: Box<dyn ReportSink>,
    metrics: SinkMetrics,
}

/// Fans each report out to its sinks
///
/// Reporting is effectively on only while the internal flag is set *and* the
/// configuration resolves to enabled.
pub struct Dispatcher {
    config: ReportingConfig,
    sinks: Vec<SinkEntry>,
    enabled: AtomicBool,
}

impl Dispatcher {
    /// Turn reporting on.
    ///
    /// A disabled configuration makes this a no-op.
    ///
    /// # Errors
    /// [`DispatcherError::NoSinks`] if no sink was injected.
    #[instrument(name = "dispatcher_enable", skip(self), fields(sinks = self.sinks.len()))]
    pub fn enable(&self) -> Result<(), DispatcherError> {
        if !self.config.enabled() {
            debug!("Configuration disabled, enable ignored");
            return Ok(());
        }
        if self.sinks.is_empty() {
            return Err(DispatcherError::NoSinks);
        }

        self.enabled.store(true, Ordering::Release);
        info!(sinks = self.sinks.len(), "Exception reporting enabled");
        Ok(())
    }

    /// Turn reporting off (idempotent)
    pub fn disable(&self) {
        if self.enabled.swap(false, Ordering::AcqRel) {
            info!("Exception reporting disabled");
        }
    }

    /// Whether a report would reach the sinks right now
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire) && self.config.enabled()
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    /// Names of the sinks, in delivery order
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|e| e.sink.name()).collect()
    }

    /// Get metrics for all sinks
    pub fn sink_metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.sinks
            .iter()
            .map(|e| (e.sink.name().to_string(), e.metrics.snapshot()))
            .collect()
    }

    /// Report an exception observed on the calling thread
    pub fn report(&self, exception: &ExceptionInfo, scope: Option<&str>) {
        self.report_from(exception, ThreadInfo::current(), scope);
    }

    /// Report an exception raised on `thread_info`'s thread.
    ///
    /// Never fails and never panics outward: a sink error or panic is
    /// logged, counted, and skipped.
    #[instrument(
        name = "dispatcher_report",
        skip_all,
        fields(exception_type = %exception.type_name, thread = %thread_info.thread_name)
    )]
    pub fn report_from(&self, exception: &ExceptionInfo, thread_info: ThreadInfo, scope: Option<&str>) {
        if !self.is_enabled() {
            return;
        }
        let Some(_guard) = ReentryGuard::enter() else {
            debug!("Report raised during delivery, skipped");
            return;
        };

        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            ExceptionPayload::build(exception, thread_info, scope)
        }));
        let payload = match built {
            Ok(payload) => payload,
            Err(_) => {
                warn!("Payload construction panicked, report dropped");
                return;
            }
        };

        record_report(&payload.exception_type);
        for entry in &self.sinks {
            Self::deliver(entry, &payload);
        }
    }

    fn deliver(entry: &SinkEntry, payload: &ExceptionPayload) {
        let name = entry.sink.name();
        match panic::catch_unwind(AssertUnwindSafe(|| entry.sink.send(payload))) {
            Ok(Ok(())) => {
                entry.metrics.inc_write_count();
                record_delivery(name, true);
            }
            Ok(Err(e)) => {
                entry.metrics.inc_failure_count();
                record_delivery(name, false);
                warn!(sink = %name, error = %e, "Delivery failed");
            }
            Err(_) => {
                entry.metrics.inc_panic_count();
                record_delivery(name, false);
                warn!(sink = %name, "Sink panicked during delivery");
            }
        }
    }
}

/// Convenience function: build the configured sinks and a dispatcher over them
#[instrument(name = "dispatcher_create", skip(config))]
pub fn create_dispatcher(config: ReportingConfig) -> Result<Dispatcher, DispatcherError> {
    let sinks = create_sinks(&config)?;
    Ok(DispatcherBuilder::new(config).sinks(sinks).build())
}
