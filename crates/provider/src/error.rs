//! Error types for the provider registry.

use std::path::PathBuf;

use pve_client::{ClientError, ErrorKind};
use pve_config::{ConfigError, ValueType};
use thiserror::Error;

/// Inconsistencies between the declared resources and the registered handlers.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No handler registered for resource {0}")]
    MissingResource(String),

    #[error("Handler registered for undeclared resource {0}")]
    UnexpectedResource(String),

    #[error("No handler registered for data source {0}")]
    MissingDataSource(String),

    #[error("Handler registered for undeclared data source {0}")]
    UnexpectedDataSource(String),

    #[error("Handler registered as {registered} reports name {reported}")]
    NameMismatch {
        registered: String,
        reported: String,
    },

    #[error("Default for {key} does not match its declared type {expected}")]
    DefaultTypeMismatch { key: String, expected: ValueType },
}

/// Errors surfaced by provider-level operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Invalid log level '{level}' for {module}")]
    InvalidLogLevel { module: String, level: String },

    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl ProviderError {
    /// Classification of configuration and client errors; `None` otherwise.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Config(_) => Some(ErrorKind::Config),
            Self::Client(err) => Some(err.kind()),
            Self::InvalidLogLevel { .. } => Some(ErrorKind::Config),
            Self::Registry(_) | Self::LogFile { .. } | Self::LoggingInit(_) => None,
        }
    }
}
