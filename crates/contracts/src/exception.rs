//! ExceptionInfo - what went wrong
//!
//! A self-contained description of one failure: either a panic seen by the
//! panic hook or an `Error` handed in by the caller.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::panic::PanicHookInfo;
use std::sync::Arc;

/// `exception_type` used for every panic
pub const PANIC_TYPE_NAME: &str = "panic";

/// Exception metadata consumed by the payload builder
#[derive(Debug, Clone)]
pub struct ExceptionInfo {
    /// Short type name (e.g. `ParseIntError`)
    pub type_name: String,
    /// Display text of the failure
    pub message: String,
    /// Source location as `file:line:col` (panics only)
    pub location: Option<String>,
    /// `Error::source` chain, outermost first
    pub causes: Vec<String>,
    /// Stack captured when the failure was observed
    pub backtrace: Option<Arc<Backtrace>>,
}

impl ExceptionInfo {
    /// Create exception info without location, causes or backtrace
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            location: None,
            causes: Vec::new(),
            backtrace: None,
        }
    }

    /// Describe an error value.
    ///
    /// The type name comes from the static type `E`, so pass the concrete
    /// error where possible; a `dyn Error` reports as `Error`.
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            type_name: short_type_name(std::any::type_name::<E>()),
            message: err.to_string(),
            location: None,
            causes,
            backtrace: Some(Arc::new(Backtrace::force_capture())),
        }
    }

    /// Describe a panic from inside a panic hook
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        Self {
            type_name: PANIC_TYPE_NAME.to_string(),
            message,
            location: info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
            causes: Vec::new(),
            backtrace: Some(Arc::new(Backtrace::force_capture())),
        }
    }

    /// Set the source location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Append a cause
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Attach a captured backtrace
    pub fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = Some(Arc::new(backtrace));
        self
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

/// Reduce a `std::any::type_name` to its last path segment, dropping generics.
///
/// `core::num::error::ParseIntError` -> `ParseIntError`,
/// `my_crate::Wrapper<alloc::string::String>` -> `Wrapper`.
pub fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full).trim();
    let base = base.trim_start_matches("dyn ").trim_start_matches('&');
    base.rsplit("::").next().unwrap_or(base).to_string()
}
