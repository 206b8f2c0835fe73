//! Connection configuration types for the Proxmox provider.
//!
//! Responsibilities:
//! - Define the resolved connection settings (URL, credentials, TLS, timeout, proxy, headers).
//! - Define the top-level `Config` combining connection and logging settings.
//! - Provide convenience constructors for the two credential modes.
//!
//! Does NOT handle:
//! - Loading values from the host framework or environment (see `loader` module).
//! - Credential-mode resolution or URL validation (see client crate).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Secret fields (password, token secret, OTP) are `SecretString` and never
//!   appear in `Debug` output.
//! - Default values come from `constants`, not magic numbers.
//! - `timeout_seconds` is stored as supplied; positivity is enforced by
//!   [`ConnectionConfig::timeout`] so malformed input yields an error, not a panic.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS, keys};
use crate::loader::ConfigError;
use crate::types::ExtraHeaders;

/// Resolved connection parameters for the Proxmox VE API.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// API endpoint, e.g. `https://pve.example.com:8006/api2/json`
    pub api_url: String,
    /// User in `name@realm` form (password auth)
    pub user: Option<String>,
    pub password: Option<SecretString>,
    /// API token ID in `name@realm!tokenname` form
    pub token_id: Option<String>,
    pub token_secret: Option<SecretString>,
    /// One-time password for two-factor login (password auth only)
    pub otp: Option<SecretString>,
    /// Accept any server certificate
    pub tls_insecure: bool,
    /// Log every API request
    pub debug: bool,
    /// Request timeout in seconds; must be positive
    pub timeout_seconds: i64,
    pub proxy_url: Option<String>,
    pub extra_headers: ExtraHeaders,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            user: None,
            password: None,
            token_id: None,
            token_secret: None,
            otp: None,
            tls_insecure: false,
            debug: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
            extra_headers: ExtraHeaders::new(),
        }
    }
}

impl ConnectionConfig {
    /// Create a config using user/password authentication.
    pub fn with_password(api_url: String, user: String, password: SecretString) -> Self {
        Self {
            api_url,
            user: Some(user),
            password: Some(password),
            ..Self::default()
        }
    }

    /// Create a config using API token authentication.
    pub fn with_api_token(api_url: String, token_id: String, token_secret: SecretString) -> Self {
        Self {
            api_url,
            token_id: Some(token_id),
            token_secret: Some(token_secret),
            ..Self::default()
        }
    }

    /// The request timeout as a `Duration`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if `timeout_seconds` is zero or negative.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        u64::try_from(self.timeout_seconds)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidTimeout {
                message: format!(
                    "{} must be greater than 0 seconds (got {})",
                    keys::TIMEOUT,
                    self.timeout_seconds
                ),
            })
    }
}

/// File logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Write logs to `file` instead of stderr
    pub enabled: bool,
    pub file: PathBuf,
    /// Level per module; `_default` sets the global level
    pub levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: PathBuf::from(DEFAULT_LOG_FILE),
            levels: BTreeMap::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub logging: LoggingConfig,
}
