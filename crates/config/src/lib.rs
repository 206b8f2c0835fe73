//! Configuration management for the Proxmox provider.
//!
//! This crate declares the provider configuration schema and loads
//! connection settings from host-supplied values, environment variables,
//! and `.env` files.

pub mod constants;
mod loader;
pub mod schema;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use schema::{ConfigSchema, SchemaEntry, ValueType};
pub use types::{Config, ConnectionConfig, ExtraHeaders, LoggingConfig};
