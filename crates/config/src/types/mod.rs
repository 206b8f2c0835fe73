//! Configuration type definitions for the Proxmox provider.
//!
//! Responsibilities:
//! - Define the resolved connection, logging, and header types.
//!
//! Does NOT handle:
//! - Configuration loading from values or environment variables (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` or redacting `Debug` impls.

pub(crate) mod connection;
mod headers;

pub use connection::{Config, ConnectionConfig, LoggingConfig};
pub use headers::ExtraHeaders;
