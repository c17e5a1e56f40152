//! Per-thread guard against reporting from inside a delivery.
//!
//! A panic raised while a sink runs goes back through the panic hook and would
//! otherwise call `report` again on the same thread.

use std::cell::Cell;

thread_local! {
    static DELIVERING: Cell<bool> = const { Cell::new(false) };
}

pub(crate) struct ReentryGuard {
    _private: (),
}

impl ReentryGuard {
    /// Mark this thread as delivering; `None` if it already is
    pub(crate) fn enter() -> Option<Self> {
        DELIVERING.with(|flag| {
            if flag.replace(true) {
                None
            } else {
                Some(Self { _private: () })
            }
        })
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        DELIVERING.with(|flag| flag.set(false));
    }
}
