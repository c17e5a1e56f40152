//! ExceptionPayload - the report record
//!
//! Built once per report and handed to every sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::backtrace::BacktraceStatus;
use std::fmt::Write as _;

use crate::{ContractError, ExceptionInfo, ThreadInfo};

/// Structured exception report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionPayload {
    /// ISO-8601 UTC with trailing `Z`
    pub timestamp: String,
    pub exception_type: String,
    pub exception_message: String,
    /// Formatted multi-line traceback
    pub traceback: String,
    pub thread_info: ThreadInfo,
    /// Caller-supplied tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl ExceptionPayload {
    /// Build a payload stamped with the current time
    pub fn build(exception: &ExceptionInfo, thread_info: ThreadInfo, scope: Option<&str>) -> Self {
        Self::build_at(exception, thread_info, scope, Utc::now())
    }

    /// Build a payload stamped with `now`.
    ///
    /// An empty scope is treated as absent.
    pub fn build_at(
        exception: &ExceptionInfo,
        thread_info: ThreadInfo,
        scope: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            exception_type: exception.type_name.clone(),
            exception_message: exception.message.clone(),
            traceback: format_traceback(exception),
            thread_info,
            scope: scope.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> Result<String, ContractError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render the traceback text for an exception.
///
/// Sections without data are skipped, and a backtrace that was not actually
/// captured (unsupported platform) is left out.
pub fn format_traceback(exception: &ExceptionInfo) -> String {
    let mut out = exception.to_string();

    if let Some(location) = &exception.location {
        let _ = write!(out, "\n  at {location}");
    }

    if !exception.causes.is_empty() {
        out.push_str("\n\nCaused by:");
        for (i, cause) in exception.causes.iter().enumerate() {
            let _ = write!(out, "\n    {i}: {cause}");
        }
    }

    if let Some(backtrace) = &exception.backtrace {
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(out, "\n\nStack backtrace:\n{backtrace}");
        }
    }

    out
}
