//! Sink metrics for observability

use metrics::counter;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter: reports that reached the sinks, labelled by `exception_type`
pub const REPORTS_TOTAL: &str = "exception_reports_total";

/// Counter: sink deliveries, labelled by `sink` and `status`
pub const SINK_DELIVERIES_TOTAL: &str = "exception_sink_deliveries_total";

/// Metrics for a single sink
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Total successful deliveries
    write_count: AtomicU64,
    /// Total deliveries that returned an error
    failure_count: AtomicU64,
    /// Total deliveries that panicked
    panic_count: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total write count
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    /// Increment write count
    pub fn inc_write_count(&self) {
        self.write_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get panic count
    pub fn panic_count(&self) -> u64 {
        self.panic_count.load(Ordering::Relaxed)
    }

    /// Increment panic count
    pub fn inc_panic_count(&self) {
        self.panic_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            write_count: self.write_count(),
            failure_count: self.failure_count(),
            panic_count: self.panic_count(),
        }
    }
}

/// Snapshot of sink metrics (for reporting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub write_count: u64,
    pub failure_count: u64,
    pub panic_count: u64,
}

/// Record one dispatched report
pub fn record_report(exception_type: &str) {
    counter!(
        REPORTS_TOTAL,
        "exception_type" => exception_type.to_string()
    )
    .increment(1);
}

/// Record one sink delivery attempt
pub fn record_delivery(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        SINK_DELIVERIES_TOTAL,
        "sink" => sink_name.to_string(),
        "status" => status
    )
    .increment(1);
}
