//! Environment resolution for the enabled flag

use tracing::trace;

/// Environment variable consulted when no explicit flag is given
pub const ENV_VAR_NAME: &str = "CURSOR_EXCEPTION_REPORTING";

const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];

/// Whether a raw value counts as enabled (case-insensitive)
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    TRUTHY.contains(&value.as_str())
}

/// Read `CURSOR_EXCEPTION_REPORTING`; unset or non-UTF-8 means disabled
pub fn enabled_from_env() -> bool {
    let enabled = std::env::var(ENV_VAR_NAME)
        .map(|v| is_truthy(&v))
        .unwrap_or(false);
    trace!(var = ENV_VAR_NAME, enabled, "Resolved enabled flag from environment");
    enabled
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ENV_VAR_NAME;
    use std::sync::{Mutex, PoisonError};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Run `f` with the variable set (or removed), restoring it afterwards
    pub fn with_env<R>(value: Option<&str>, f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = std::env::var_os(ENV_VAR_NAME);

        match value {
            Some(v) => std::env::set_var(ENV_VAR_NAME, v),
            None => std::env::remove_var(ENV_VAR_NAME),
        }
        let result = f();

        match saved {
            Some(v) => std::env::set_var(ENV_VAR_NAME, v),
            None => std::env::remove_var(ENV_VAR_NAME),
        }
        result
    }
}
