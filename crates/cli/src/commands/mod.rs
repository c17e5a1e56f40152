//! Command implementations.

mod info;
mod panic;
mod report;

pub use info::run_info;
pub use panic::run_panic;
pub use report::run_report;
