//! Configuration loader for host-supplied values and environment variables.
//!
//! Responsibilities:
//! - Collect configuration values from the host framework, builder methods,
//!   environment variables, and `.env` files.
//! - Validate every value against the [`ConfigSchema`](crate::schema::ConfigSchema).
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Credential-mode resolution or URL shape validation (see client crate).
//!
//! Invariants / Assumptions:
//! - Environment variables are only consulted for keys that are still absent.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
