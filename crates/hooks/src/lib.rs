//! # Hooks
//!
//! Process-wide interception of uncaught panics.
//!
//! Two layers:
//! - [`runtime`]: the global callback slots (main thread, worker threads) and
//!   the router that feeds them from `std::panic`
//! - [`HookManager`]: installs reporting handlers into those slots and
//!   restores the previous hooks on uninstall
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use config_loader::ReportingConfig;
//! use dispatcher::create_dispatcher;
//! use hooks::HookManager;
//!
//! let dispatcher = Arc::new(create_dispatcher(ReportingConfig::default()).unwrap());
//! dispatcher.enable().unwrap();
//! HookManager::global().install(dispatcher);
//! ```

mod manager;
pub mod runtime;

pub use manager::HookManager;
pub use runtime::{MainHook, ThreadHook, ThreadPanicArgs, UncaughtPanic};
