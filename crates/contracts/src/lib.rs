//! # Contracts
//!
//! Shared data model for exception reporting.
//! Every other crate in the workspace depends on this one; it depends on none of them.
//!
//! ## Flow
//! - `ExceptionInfo` + `ThreadInfo` describe one uncaught failure
//! - `ExceptionPayload::build` turns them into the immutable report record
//! - `ReportSink` implementations deliver the record

mod error;
mod exception;
mod payload;
mod sink;
mod thread_info;

pub use error::*;
pub use exception::{short_type_name, ExceptionInfo, PANIC_TYPE_NAME};
pub use payload::{format_traceback, ExceptionPayload};
pub use sink::ReportSink;
pub use thread_info::{designate_main_thread, is_main_thread, ThreadInfo, MAIN_THREAD_NAME};
