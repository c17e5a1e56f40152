//! ThreadInfo - which thread failed

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::thread::{self, Thread, ThreadId};

/// Name std gives the thread that runs `fn main`
pub const MAIN_THREAD_NAME: &str = "main";

// std allocates the runtime's main thread id before `main` runs
const FIRST_THREAD_ID: u64 = 1;

static MAIN_THREAD: OnceLock<ThreadId> = OnceLock::new();

/// Record the calling thread as the main thread.
///
/// The first call wins; returns whether this call recorded it. Hosts that do
/// not run on std's main thread (e.g. a library entered from a foreign
/// runtime) should call this from their main control flow.
pub fn designate_main_thread() -> bool {
    MAIN_THREAD.set(thread::current().id()).is_ok()
}

/// Whether `thread` is the main thread.
///
/// Compares identities against the designated thread. Without a designation,
/// std's own main thread is recognised by its name together with its id, so a
/// worker that was merely named `main` does not count.
pub fn is_main_thread(thread: &Thread) -> bool {
    match MAIN_THREAD.get() {
        Some(id) => *id == thread.id(),
        None => {
            thread.name() == Some(MAIN_THREAD_NAME)
                && numeric_id(thread.id()) == FIRST_THREAD_ID
        }
    }
}

/// Thread context captured at report time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadInfo {
    pub thread_name: String,
    pub thread_id: u64,
    pub is_main_thread: bool,
}

impl ThreadInfo {
    /// Context of the calling thread
    pub fn current() -> Self {
        Self::from_thread(&thread::current())
    }

    /// Context of the given thread
    pub fn from_thread(thread: &Thread) -> Self {
        Self {
            thread_name: thread.name().unwrap_or("<unnamed>").to_string(),
            thread_id: numeric_id(thread.id()),
            is_main_thread: is_main_thread(thread),
        }
    }
}

// `ThreadId::as_u64` is unstable; the Debug form is `ThreadId(N)`.
fn numeric_id(id: ThreadId) -> u64 {
    let repr = format!("{id:?}");
    repr.trim_start_matches("ThreadId(")
        .trim_end_matches(')')
        .parse()
        .unwrap_or(0)
}
