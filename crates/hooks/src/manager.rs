//! HookManager - install/uninstall state machine over the runtime slots

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dispatcher::Dispatcher;
use tracing::{debug, info};

use crate::runtime::{self, MainHook, ThreadHook, ThreadPanicArgs, UncaughtPanic};

struct HookState {
    previous_main: Option<MainHook>,
    previous_thread: Option<ThreadHook>,
    dispatcher: Option<Arc<Dispatcher>>,
}

/// Process-wide owner of the reporting hooks
///
/// `Uninstalled` -> `install` -> `Installed` -> `uninstall` -> `Uninstalled`.
/// The hooks found in the slots at the first `install` of a cycle are the ones
/// put back by `uninstall`; a hook a third party set in between is dropped.
pub struct HookManager {
    state: Mutex<HookState>,
}

static GLOBAL: HookManager = HookManager {
    state: Mutex::new(HookState {
        previous_main: None,
        previous_thread: None,
        dispatcher: None,
    }),
};

impl HookManager {
    /// The process-wide manager
    pub fn global() -> &'static HookManager {
        &GLOBAL
    }

    fn state(&self) -> MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Route both slots to `dispatcher`, chaining to the previous hooks.
    ///
    /// Puts the router back into `std::panic` if an earlier `uninstall`
    /// released it, capturing whatever std hook the host set meanwhile.
    /// Installing again while installed swaps the dispatcher but keeps the
    /// hooks captured by the first install.
    pub fn install(&self, dispatcher: Arc<Dispatcher>) {
        let mut state = self.state();
        runtime::ensure_router();

        let previous_main = state
            .previous_main
            .get_or_insert_with(runtime::main_hook)
            .clone();
        let previous_thread = state
            .previous_thread
            .get_or_insert_with(runtime::thread_hook)
            .clone();

        runtime::set_main_hook(main_handler(Arc::clone(&dispatcher), previous_main));
        runtime::set_thread_hook(thread_handler(Arc::clone(&dispatcher), previous_thread));

        let reinstall = state.dispatcher.replace(dispatcher).is_some();
        info!(reinstall, "Exception hooks installed");
    }

    /// Put the captured hooks back and forget the dispatcher (idempotent).
    ///
    /// When both slots end up at their defaults the router leaves
    /// `std::panic` too.
    pub fn uninstall(&self) {
        let mut state = self.state();

        if let Some(previous) = state.previous_main.take() {
            runtime::set_main_hook(previous);
        }
        if let Some(previous) = state.previous_thread.take() {
            runtime::set_thread_hook(previous);
        }

        if state.dispatcher.take().is_some() {
            let released = runtime::release_router();
            info!(released, "Exception hooks uninstalled");
        } else {
            debug!("Uninstall without active hooks");
        }
    }

    /// Whether a dispatcher is currently installed
    pub fn is_installed(&self) -> bool {
        self.state().dispatcher.is_some()
    }

    /// The installed dispatcher, if any
    pub fn dispatcher(&self) -> Option<Arc<Dispatcher>> {
        self.state().dispatcher.clone()
    }
}

fn main_handler(dispatcher: Arc<Dispatcher>, previous: MainHook) -> MainHook {
    Arc::new(move |event: &UncaughtPanic<'_>| {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            dispatcher.report(&event.exception, None);
        }));
        previous(event);
    })
}

fn thread_handler(dispatcher: Arc<Dispatcher>, previous: ThreadHook) -> ThreadHook {
    Arc::new(move |event: &ThreadPanicArgs<'_>| {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            dispatcher.report_from(&event.exception, event.thread.clone(), None);
        }));
        previous(event);
    })
}
