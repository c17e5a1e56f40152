//! Global callback slots for uncaught panics.
//!
//! std offers a single panic hook for every thread. This module installs one
//! router into it and splits events into two replaceable slots: one for the
//! main thread and one for worker threads. Each slot starts with a default
//! hook that forwards to whatever std hook was in place before the router, so
//! std's usual stderr output is kept.
//!
//! The router goes in whenever a slot is set and is not live, taking the then
//! current std hook. [`release_router`] hands `std::panic` back to that hook
//! once both slots hold their defaults again. Replacing the std hook directly
//! while the router is live bypasses both slots.

use std::panic::{self, PanicHookInfo};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use std::thread;

use contracts::{ExceptionInfo, ThreadInfo};
use tracing::debug;

/// Hook for panics on the main thread
pub type MainHook = Arc<dyn Fn(&UncaughtPanic<'_>) + Send + Sync>;

/// Hook for panics on any other thread
pub type ThreadHook = Arc<dyn Fn(&ThreadPanicArgs<'_>) + Send + Sync>;

type StdHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// Uncaught panic on the main thread
pub struct UncaughtPanic<'a> {
    pub exception: ExceptionInfo,
    raw: Option<&'a PanicHookInfo<'a>>,
}

impl<'a> UncaughtPanic<'a> {
    /// Synthetic event without std panic info
    pub fn new(exception: ExceptionInfo) -> Self {
        Self {
            exception,
            raw: None,
        }
    }

    fn from_std(info: &'a PanicHookInfo<'a>) -> Self {
        #[cfg(test)]
        tests::EVENTS_BUILT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self {
            exception: ExceptionInfo::from_panic(info),
            raw: Some(info),
        }
    }

    /// The std panic info, when the event came from a real panic
    pub fn raw(&self) -> Option<&'a PanicHookInfo<'a>> {
        self.raw
    }
}

/// Uncaught panic on a worker thread, with the thread it came from
pub struct ThreadPanicArgs<'a> {
    pub exception: ExceptionInfo,
    pub thread: ThreadInfo,
    raw: Option<&'a PanicHookInfo<'a>>,
}

impl<'a> ThreadPanicArgs<'a> {
    /// Synthetic event without std panic info
    pub fn new(exception: ExceptionInfo, thread: ThreadInfo) -> Self {
        Self {
            exception,
            thread,
            raw: None,
        }
    }

    fn from_std(info: &'a PanicHookInfo<'a>, thread: ThreadInfo) -> Self {
        #[cfg(test)]
        tests::EVENTS_BUILT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self {
            exception: ExceptionInfo::from_panic(info),
            thread,
            raw: Some(info),
        }
    }

    /// The std panic info, when the event came from a real panic
    pub fn raw(&self) -> Option<&'a PanicHookInfo<'a>> {
        self.raw
    }
}

/// std hook displaced by the router; `Some` while the router is live
static SAVED_STD_HOOK: Mutex<Option<Arc<StdHook>>> = Mutex::new(None);

/// Serializes router install/release. Never taken from inside `route`: a
/// panicking thread holds std's hook lock while the router runs.
static ROUTER_GATE: Mutex<()> = Mutex::new(());

static MAIN_SLOT: RwLock<Option<MainHook>> = RwLock::new(None);
static THREAD_SLOT: RwLock<Option<ThreadHook>> = RwLock::new(None);

static DEFAULT_MAIN: OnceLock<MainHook> = OnceLock::new();
static DEFAULT_THREAD: OnceLock<ThreadHook> = OnceLock::new();

fn saved_std_hook() -> MutexGuard<'static, Option<Arc<StdHook>>> {
    SAVED_STD_HOOK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn gate() -> MutexGuard<'static, ()> {
    ROUTER_GATE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Put the router into `std::panic` if it is not live.
///
/// The std hook found there becomes the target of the default hooks. Does
/// nothing on a panicking thread, where std forbids touching the hook.
pub fn ensure_router() {
    if thread::panicking() {
        return;
    }
    let _gate = gate();
    if is_router_live() {
        return;
    }

    let previous = panic::take_hook();
    *saved_std_hook() = Some(Arc::new(previous));
    panic::set_hook(Box::new(route));
    debug!("Panic router installed");
}

/// Give `std::panic` back to the hook the router displaced, provided both
/// slots hold their defaults. Returns whether the router was taken out.
pub fn release_router() -> bool {
    if thread::panicking() {
        return false;
    }
    let _gate = gate();
    let idle = Arc::ptr_eq(&main_hook(), &default_main_hook())
        && Arc::ptr_eq(&thread_hook(), &default_thread_hook());
    if !idle || !is_router_live() {
        return false;
    }

    // Waits for in-flight panics to leave the router
    drop(panic::take_hook());
    let Some(saved) = saved_std_hook().take() else {
        return false;
    };
    match Arc::try_unwrap(saved) {
        Ok(hook) => panic::set_hook(hook),
        Err(shared) => {
            panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| (**shared)(info)))
        }
    }
    debug!("Panic router released");
    true
}

/// Whether the router currently sits in `std::panic`
pub fn is_router_live() -> bool {
    saved_std_hook().is_some()
}

fn route(info: &PanicHookInfo<'_>) {
    let thread = ThreadInfo::current();
    if thread.is_main_thread {
        let hook = main_hook();
        if Arc::ptr_eq(&hook, &default_main_hook()) {
            // Nobody listens: skip building the event and its backtrace
            forward_raw(info);
        } else {
            hook(&UncaughtPanic::from_std(info));
        }
    } else {
        let hook = thread_hook();
        if Arc::ptr_eq(&hook, &default_thread_hook()) {
            forward_raw(info);
        } else {
            hook(&ThreadPanicArgs::from_std(info, thread));
        }
    }
}

fn forward_raw(info: &PanicHookInfo<'_>) -> bool {
    // Clone out so the std hook runs without the lock held
    let saved = saved_std_hook().clone();
    match saved {
        Some(std_hook) => {
            (**std_hook)(info);
            true
        }
        None => false,
    }
}

/// The default main-thread hook (stable identity)
pub fn default_main_hook() -> MainHook {
    DEFAULT_MAIN
        .get_or_init(|| {
            let hook: MainHook = Arc::new(|event: &UncaughtPanic<'_>| {
                forward_to_std(event.raw, &event.exception, &ThreadInfo::current());
            });
            hook
        })
        .clone()
}

/// The default worker-thread hook (stable identity)
pub fn default_thread_hook() -> ThreadHook {
    DEFAULT_THREAD
        .get_or_init(|| {
            let hook: ThreadHook = Arc::new(|event: &ThreadPanicArgs<'_>| {
                forward_to_std(event.raw, &event.exception, &event.thread);
            });
            hook
        })
        .clone()
}

fn forward_to_std(raw: Option<&PanicHookInfo<'_>>, exception: &ExceptionInfo, thread: &ThreadInfo) {
    if raw.is_some_and(forward_raw) {
        return;
    }
    let location = exception
        .location
        .as_deref()
        .map(|l| format!(" at {l}"))
        .unwrap_or_default();
    eprintln!(
        "thread '{}' panicked{}:\n{}",
        thread.thread_name, location, exception.message
    );
}

/// Current main-thread hook
pub fn main_hook() -> MainHook {
    let slot = MAIN_SLOT.read().unwrap_or_else(PoisonError::into_inner);
    slot.clone().unwrap_or_else(default_main_hook)
}

/// Replace the main-thread hook
pub fn set_main_hook(hook: MainHook) {
    ensure_router();
    *MAIN_SLOT.write().unwrap_or_else(PoisonError::into_inner) = Some(hook);
}

/// Current worker-thread hook
pub fn thread_hook() -> ThreadHook {
    let slot = THREAD_SLOT.read().unwrap_or_else(PoisonError::into_inner);
    slot.clone().unwrap_or_else(default_thread_hook)
}

/// Replace the worker-thread hook
pub fn set_thread_hook(hook: ThreadHook) {
    ensure_router();
    *THREAD_SLOT.write().unwrap_or_else(PoisonError::into_inner) = Some(hook);
}

/// Invoke the current main-thread hook
pub fn fire_main(event: &UncaughtPanic<'_>) {
    // Clone out first so the hook may replace its own slot
    let hook = main_hook();
    hook(event);
}

/// Invoke the current worker-thread hook
pub fn fire_thread(event: &ThreadPanicArgs<'_>) {
    let hook = thread_hook();
    hook(event);
}
