//! ReportSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use std::sync::Arc;

use crate::{ContractError, ExceptionPayload};

/// Report delivery trait
///
/// All sink implementations must implement this trait. `send` is synchronous
/// and may be called from inside a panic hook on any thread.
pub trait ReportSink: Send + Sync {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one payload
    ///
    /// # Errors
    /// Returns delivery error (should include context)
    fn send(&self, payload: &ExceptionPayload) -> Result<(), ContractError>;
}

impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(&self, payload: &ExceptionPayload) -> Result<(), ContractError> {
        (**self).send(payload)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(&self, payload: &ExceptionPayload) -> Result<(), ContractError> {
        (**self).send(payload)
    }
}
