//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods and schema defaults.
//! - Test host-supplied values (unknown keys, type checks, null/empty handling).
//! - Test environment fallbacks and their precedence.
//! - Test dotenv loading.
//!
//! Invariants:
//! - Tests touching the environment use `serial_test` and `with_pm_env`, which
//!   clears every fallback variable not explicitly set.
//! - Tests use `global_test_lock()` for additional synchronization.

use std::sync::Mutex;

use crate::schema::ConfigSchema;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Run `f` with every schema fallback variable unset except those in `vars`.
pub fn with_pm_env<F, R>(vars: &[(&'static str, &'static str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let schema = ConfigSchema::new();
    let mut all: Vec<(&'static str, Option<&'static str>)> = schema
        .entries()
        .iter()
        .filter_map(|entry| entry.env_var)
        .filter(|var| !vars.iter().any(|(name, _)| name == var))
        .map(|var| (var, None))
        .collect();
    all.extend(vars.iter().map(|(name, value)| (*name, Some(*value))));
    temp_env::with_vars(all, f)
}
