//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges host-supplied values,
//!   builder methods, environment fallbacks, and schema defaults.
//! - Type-check every value against the schema as it is inserted.
//! - Build the final `Config` from the collected values.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Credential-mode resolution, URL shape, timeout, proxy and header syntax
//!   (enforced by the client crate when the client is built).
//!
//! Invariants / Assumptions:
//! - Builder methods overwrite any earlier value for the same key.
//! - `from_values` rejects unknown keys and values of the wrong type.
//! - `from_env` only fills keys that are still absent.
//! - Schema defaults apply last.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use std::collections::BTreeMap;
use std::path::PathBuf;

use secrecy::SecretString;
use serde_json::{Map, Value};

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS, keys};
use crate::schema::ConfigSchema;
use crate::types::{Config, ConnectionConfig, ExtraHeaders, LoggingConfig};

/// Configuration loader that builds config from host values and the environment.
pub struct ConfigLoader {
    schema: ConfigSchema,
    values: BTreeMap<&'static str, Value>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader for the provider schema.
    pub fn new() -> Self {
        Self::for_schema(ConfigSchema::new())
    }

    /// Create a loader that validates and resolves against `schema`.
    pub fn for_schema(schema: ConfigSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read values supplied by the host framework.
    ///
    /// `null` values and empty strings are treated as unset, so their
    /// environment fallbacks still apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys outside the schema and
    /// [`ConfigError::InvalidValue`] for values of the wrong type.
    pub fn from_values(mut self, values: &Map<String, Value>) -> Result<Self, ConfigError> {
        for (key, value) in values {
            let entry = self.schema.lookup(key)?;
            if value.is_null() || value.as_str().is_some_and(str::is_empty) {
                continue;
            }
            entry.check(value)?;
            let key = entry.key;
            self.values.insert(key, value.clone());
        }
        Ok(self)
    }

    /// Fill absent keys from their environment fallbacks.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the API URL.
    pub fn with_api_url(mut self, url: String) -> Self {
        self.insert(keys::API_URL, Value::String(url));
        self
    }

    /// Set the user.
    pub fn with_user(mut self, user: String) -> Self {
        self.insert(keys::USER, Value::String(user));
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.insert(keys::PASSWORD, Value::String(password));
        self
    }

    /// Set the API token ID and secret.
    pub fn with_api_token(self, token_id: String, secret: String) -> Self {
        self.with_token_id(token_id).with_token_secret(secret)
    }

    /// Set the API token ID alone; the secret may come from the environment.
    pub fn with_token_id(mut self, token_id: String) -> Self {
        self.insert(keys::API_TOKEN_ID, Value::String(token_id));
        self
    }

    pub fn with_token_secret(mut self, secret: String) -> Self {
        self.insert(keys::API_TOKEN_SECRET, Value::String(secret));
        self
    }

    /// Set the one-time password.
    pub fn with_otp(mut self, otp: String) -> Self {
        self.insert(keys::OTP, Value::String(otp));
        self
    }

    /// Set whether to accept any server certificate.
    pub fn with_tls_insecure(mut self, insecure: bool) -> Self {
        self.insert(keys::TLS_INSECURE, Value::Bool(insecure));
        self
    }

    /// Set request debug logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.insert(keys::DEBUG, Value::Bool(debug));
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_seconds(mut self, secs: i64) -> Self {
        self.insert(keys::TIMEOUT, Value::from(secs));
        self
    }

    /// Set the proxy server URL.
    pub fn with_proxy_url(mut self, url: String) -> Self {
        self.insert(keys::PROXY_SERVER, Value::String(url));
        self
    }

    /// Set the extra HTTP headers.
    pub fn with_headers(mut self, headers: ExtraHeaders) -> Self {
        self.insert(keys::HTTP_HEADERS, headers.to_json());
        self
    }

    /// Enable or disable file logging.
    pub fn with_log_enable(mut self, enable: bool) -> Self {
        self.insert(keys::LOG_ENABLE, Value::Bool(enable));
        self
    }

    /// Set the log file path.
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.insert(
            keys::LOG_FILE,
            Value::String(path.to_string_lossy().into_owned()),
        );
        self
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] when a required key has no
    /// non-blank value after values, builder methods and environment fallbacks.
    pub fn build(self) -> Result<Config, ConfigError> {
        for entry in self.schema.entries().iter().filter(|e| !e.optional) {
            let present = match self.values.get(entry.key) {
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
                None => false,
            };
            if !present {
                return Err(ConfigError::MissingRequired {
                    key: entry.key.to_string(),
                    env: entry.env_var.map(str::to_string),
                });
            }
        }

        let connection = ConnectionConfig {
            api_url: self.string(keys::API_URL).unwrap_or_default(),
            user: self.string(keys::USER),
            password: self.secret(keys::PASSWORD),
            token_id: self.string(keys::API_TOKEN_ID),
            token_secret: self.secret(keys::API_TOKEN_SECRET),
            otp: self.secret(keys::OTP),
            tls_insecure: self.bool(keys::TLS_INSECURE),
            debug: self.bool(keys::DEBUG),
            timeout_seconds: self
                .value(keys::TIMEOUT)
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            proxy_url: self.string(keys::PROXY_SERVER),
            extra_headers: self
                .value(keys::HTTP_HEADERS)
                .map(ExtraHeaders::from_json)
                .unwrap_or_default(),
        };

        let logging = LoggingConfig {
            enabled: self.bool(keys::LOG_ENABLE),
            file: PathBuf::from(
                self.string(keys::LOG_FILE)
                    .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            ),
            levels: self
                .value(keys::LOG_LEVELS)
                .and_then(Value::as_object)
                .map(|levels| {
                    levels
                        .iter()
                        .filter_map(|(module, level)| {
                            level.as_str().map(|l| (module.clone(), l.to_string()))
                        })
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Config {
            connection,
            logging,
        })
    }

    /// The explicit value for a key, falling back to the schema default.
    fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key).or_else(|| {
            self.schema
                .lookup(key)
                .ok()
                .and_then(|entry| entry.default.as_ref())
        })
    }

    /// A string value; empty strings are treated as unset.
    fn string(&self, key: &str) -> Option<String> {
        self.value(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn secret(&self, key: &str) -> Option<SecretString> {
        self.string(key).map(|s| SecretString::new(s.into()))
    }

    fn bool(&self, key: &str) -> bool {
        self.value(key).and_then(Value::as_bool).unwrap_or(false)
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub(crate) fn insert(&mut self, key: &'static str, value: Value) {
        self.values.insert(key, value);
    }
}
