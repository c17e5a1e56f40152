//! Error types for the public entry points.

use thiserror::Error;

/// Errors surfaced by [`crate::enable`]
#[derive(Debug, Error)]
pub enum ReporterError {
    /// Sink construction or dispatcher configuration failed
    #[error(transparent)]
    Dispatcher(#[from] dispatcher::DispatcherError),
}

/// Result type alias for reporter operations
pub type Result<T> = std::result::Result<T, ReporterError>;
