//! Metric descriptions for the reporting counters

use dispatcher::metrics::{REPORTS_TOTAL, SINK_DELIVERIES_TOTAL};
use metrics::describe_counter;

/// Register help text for every counter the dispatcher emits
pub fn describe_metrics() {
    describe_counter!(
        REPORTS_TOTAL,
        "Exception reports fanned out to sinks, by exception type"
    );
    describe_counter!(
        SINK_DELIVERIES_TOTAL,
        "Sink delivery attempts, by sink and status (success/failure)"
    );
}
