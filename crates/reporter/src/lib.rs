//! # Exception Reporter
//!
//! Process-wide reporting of uncaught panics to an IDE-side listener.
//!
//! Failures are reported to a log file (default `.cursor/exceptions.log`), an
//! HTTP endpoint (default `http://localhost:7331/exception`), or both.
//! Reporting is off unless `enabled` is set or `CURSOR_EXCEPTION_REPORTING`
//! is truthy.
//!
//! # Example
//!
//! ```no_run
//! use exception_reporter::{EnableOptions, SinkSelection};
//!
//! exception_reporter::enable(EnableOptions::new().sink(SinkSelection::Both).enabled(true))?;
//!
//! // Uncaught panics on any thread are now reported, then std's hook runs.
//!
//! if let Err(e) = "x".parse::<u32>() {
//!     exception_reporter::report_error(&e, Some("parsing"));
//! }
//!
//! exception_reporter::disable();
//! # Ok::<(), exception_reporter::ReporterError>(())
//! ```

mod error;
mod options;

pub use config_loader::{ReportingConfig, SinkSelection, ENV_VAR_NAME};
pub use contracts::{
    designate_main_thread, ExceptionInfo, ExceptionPayload, ReportSink, ThreadInfo,
};
pub use dispatcher::{create_sinks, Dispatcher, DispatcherBuilder, DispatcherError, Sink};
pub use error::{ReporterError, Result};
pub use hooks::HookManager;
pub use options::EnableOptions;

use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument};

static ACTIVE: Mutex<Option<Arc<Dispatcher>>> = Mutex::new(None);

fn active() -> Option<Arc<Dispatcher>> {
    ACTIVE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Build sinks from `options`, enable a dispatcher over them and install the
/// hooks.
///
/// A disabled configuration still installs the hooks; they only chain to the
/// previous ones. A dispatcher left by an earlier `enable` is disabled and
/// replaced.
///
/// # Errors
/// Sink construction failures (e.g. the log directory cannot be created).
#[instrument(name = "reporter_enable", skip(options))]
pub fn enable(options: EnableOptions) -> Result<()> {
    let config = options.to_config();
    let sinks = create_sinks(&config)?;
    let dispatcher = Arc::new(DispatcherBuilder::new(config).sinks(sinks).build());
    dispatcher.enable()?;

    let previous = ACTIVE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(Arc::clone(&dispatcher));
    if let Some(previous) = previous {
        previous.disable();
    }

    HookManager::global().install(dispatcher);
    Ok(())
}

/// Uninstall the hooks and drop the active dispatcher (idempotent)
pub fn disable() {
    HookManager::global().uninstall();

    let previous = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(dispatcher) = previous {
        dispatcher.disable();
        debug!("Reporter dropped");
    }
}

/// Report an exception by hand; a no-op unless `enable` was called
pub fn report_exception(exception: &ExceptionInfo, scope: Option<&str>) {
    if let Some(dispatcher) = active() {
        dispatcher.report(exception, scope);
    }
}

/// Report an error value by hand
pub fn report_error<E: Error + ?Sized>(error: &E, scope: Option<&str>) {
    if let Some(dispatcher) = active() {
        dispatcher.report(&ExceptionInfo::from_error(error), scope);
    }
}

/// Whether the reporting hooks are installed
pub fn is_hooks_installed() -> bool {
    HookManager::global().is_installed()
}

/// Whether a report made now would reach the sinks
pub fn is_enabled() -> bool {
    active().is_some_and(|d| d.is_enabled())
}
