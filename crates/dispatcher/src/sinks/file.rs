//! FileSink - appends human-readable reports to a log file

use contracts::{ContractError, ExceptionPayload, ReportSink};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "------------------------------------------------------------";

/// Sink that appends reports to a text file
///
/// The file is opened and closed on every `send`; nothing is truncated or
/// rotated.
#[derive(Debug, Clone)]
pub struct FileSink {
    name: String,
    path: PathBuf,
}

impl FileSink {
    /// Create a new FileSink, creating missing parent directories
    #[instrument(name = "file_sink_new", skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::with_name("file", path)
    }

    /// Create a FileSink with a custom name
    pub fn with_name(name: impl Into<String>, path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Ok(Self {
            name: name.into(),
            path,
        })
    }

    /// Target log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }
}

impl ReportSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_send",
        skip(self, payload),
        fields(sink = %self.name, exception_type = %payload.exception_type)
    )]
    fn send(&self, payload: &ExceptionPayload) -> Result<(), ContractError> {
        self.append(&render_text(payload))
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, path = %self.path.display(), "Report appended");
        Ok(())
    }
}

/// Render a payload as the human-readable block written by [`FileSink`]
pub fn render_text(payload: &ExceptionPayload) -> String {
    let mut out = String::new();
    let thread = &payload.thread_info;

    let _ = writeln!(out, "Exception Report - {}", payload.timestamp);
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, "Type: {}", payload.exception_type);
    let _ = writeln!(out, "Message: {}", payload.exception_message);
    if let Some(scope) = &payload.scope {
        let _ = writeln!(out, "Scope: {scope}");
    }
    let _ = writeln!(
        out,
        "Thread: {} (ID: {})",
        thread.thread_name, thread.thread_id
    );
    let _ = writeln!(
        out,
        "Main Thread: {}",
        if thread.is_main_thread { "True" } else { "False" }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Traceback:");
    let _ = writeln!(out, "{LIGHT_RULE}");
    let _ = writeln!(out, "{}", payload.traceback.trim_end_matches('\n'));
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out);
    out
}
