//! Declarative schema of the provider configuration.
//!
//! Responsibilities:
//! - Declare every recognized configuration key with its type, optional flag,
//!   default value, environment fallback, and sensitivity.
//! - Look up entries by key, rejecting unknown keys.
//! - Type-check supplied values and parse environment fallbacks into typed values.
//!
//! Does NOT handle:
//! - Collecting values from the host framework or the environment (see `loader`).
//! - Credential or URL validation (see the client crate).
//!
//! Invariants:
//! - Every default value matches its entry's declared type.
//! - Error messages name the key or variable, never the supplied value.

use std::fmt;

use serde_json::Value;

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS, env, keys};
use crate::loader::ConfigError;
use crate::types::ExtraHeaders;

/// Type of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Bool,
    Int,
    /// String-to-string mapping.
    Map,
}

impl ValueType {
    /// Check whether a JSON value has this type.
    ///
    /// Maps must contain only string values.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Int => value.as_i64().is_some(),
            Self::Map => value
                .as_object()
                .is_some_and(|map| map.values().all(Value::is_string)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the JSON type of a value, for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// A single declared configuration key.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub key: &'static str,
    pub value_type: ValueType,
    pub optional: bool,
    pub default: Option<Value>,
    pub env_var: Option<&'static str>,
    /// Sensitive values are never logged or echoed in errors.
    pub sensitive: bool,
    pub description: &'static str,
}

impl SchemaEntry {
    fn new(key: &'static str, value_type: ValueType, description: &'static str) -> Self {
        Self {
            key,
            value_type,
            optional: true,
            default: None,
            env_var: None,
            sensitive: false,
            description,
        }
    }

    pub fn string(key: &'static str, description: &'static str) -> Self {
        Self::new(key, ValueType::String, description)
    }

    pub fn bool(key: &'static str, description: &'static str) -> Self {
        Self::new(key, ValueType::Bool, description)
    }

    pub fn int(key: &'static str, description: &'static str) -> Self {
        Self::new(key, ValueType::Int, description)
    }

    pub fn map(key: &'static str, description: &'static str) -> Self {
        Self::new(key, ValueType::Map, description)
    }

    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_env(mut self, var: &'static str) -> Self {
        self.env_var = Some(var);
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Check a supplied value against the declared type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the key and both types.
    pub fn check(&self, value: &Value) -> Result<(), ConfigError> {
        if self.value_type.matches(value) {
            return Ok(());
        }
        Err(ConfigError::InvalidValue {
            var: self.key.to_string(),
            message: format!(
                "expected {}, got {}",
                self.value_type,
                json_type_name(value)
            ),
        })
    }

    /// Parse a raw environment variable value into a typed value.
    ///
    /// Booleans accept `true`, `false`, `1` and `0` (case-insensitive). Maps use
    /// the `Name,Value,Name2,Value2` list form.
    pub fn parse_env(&self, raw: &str) -> Result<Value, ConfigError> {
        let var = self.env_var.unwrap_or(self.key);
        let invalid = |message: &str| ConfigError::InvalidValue {
            var: var.to_string(),
            message: message.to_string(),
        };

        match self.value_type {
            ValueType::String => Ok(Value::String(raw.to_string())),
            ValueType::Bool => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| invalid("must be true or false")),
            ValueType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid("must be an integer")),
            ValueType::Map => ExtraHeaders::parse_list(raw)
                .map(|headers| headers.to_json())
                .map_err(|message| invalid(&message)),
        }
    }
}

/// Parse a boolean the way the provider's environment fallbacks accept it.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// The full set of recognized provider configuration keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSchema {
    entries: Vec<SchemaEntry>,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSchema {
    /// Build the provider schema.
    pub fn new() -> Self {
        let entries = vec![
            SchemaEntry::string(keys::API_URL, "Proxmox VE API endpoint URL")
                .required()
                .with_env(env::API_URL),
            SchemaEntry::string(
                keys::USER,
                "Username in name@realm form; required unless API token auth is used",
            )
            .with_env(env::USER),
            SchemaEntry::string(keys::PASSWORD, "Password for pm_user")
                .with_env(env::PASSWORD)
                .sensitive(),
            SchemaEntry::string(keys::API_TOKEN_ID, "API token ID (name@realm!tokenname)")
                .with_env(env::API_TOKEN_ID),
            SchemaEntry::string(keys::API_TOKEN_SECRET, "API token secret")
                .with_env(env::API_TOKEN_SECRET)
                .sensitive(),
            SchemaEntry::string(keys::OTP, "One-time password for two-factor login")
                .with_env(env::OTP)
                .sensitive(),
            SchemaEntry::bool(keys::TLS_INSECURE, "Accept any server TLS certificate")
                .with_default(false)
                .with_env(env::TLS_INSECURE),
            SchemaEntry::bool(keys::DEBUG, "Log every API request")
                .with_default(false)
                .with_env(env::DEBUG),
            SchemaEntry::int(keys::TIMEOUT, "API request timeout in seconds")
                .with_default(DEFAULT_TIMEOUT_SECS)
                .with_env(env::TIMEOUT),
            SchemaEntry::string(keys::PROXY_SERVER, "Proxy server URL for API requests")
                .with_env(env::PROXY_SERVER),
            SchemaEntry::map(keys::HTTP_HEADERS, "Extra HTTP headers sent with every request")
                .with_env(env::HTTP_HEADERS)
                .sensitive(),
            SchemaEntry::bool(keys::LOG_ENABLE, "Write provider logs to pm_log_file")
                .with_default(false)
                .with_env(env::LOG_ENABLE),
            SchemaEntry::string(keys::LOG_FILE, "Log file path")
                .with_default(DEFAULT_LOG_FILE)
                .with_env(env::LOG_FILE),
            SchemaEntry::map(keys::LOG_LEVELS, "Log level per module, e.g. {_default = \"debug\"}"),
        ];
        Self { entries }
    }

    /// Build a schema from arbitrary entries.
    pub fn from_entries(entries: Vec<SchemaEntry>) -> Self {
        Self { entries }
    }

    /// Look up a key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys the provider does not recognize.
    pub fn lookup(&self, key: &str) -> Result<&SchemaEntry, ConfigError> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_insecure_is_optional_bool_defaulting_to_false() {
        let schema = ConfigSchema::new();
        let entry = schema.lookup(keys::TLS_INSECURE).unwrap();

        assert_eq!(entry.value_type, ValueType::Bool);
        assert!(entry.optional);
        assert_eq!(entry.default, Some(Value::Bool(false)));
        assert_eq!(entry.env_var, Some("PM_TLS_INSECURE"));
    }

    #[test]
    fn test_timeout_defaults_to_300() {
        let schema = ConfigSchema::new();
        let entry = schema.lookup(keys::TIMEOUT).unwrap();

        assert_eq!(entry.value_type, ValueType::Int);
        assert_eq!(entry.default, Some(Value::from(300)));
    }

    #[test]
    fn test_api_url_is_the_only_required_key() {
        let schema = ConfigSchema::new();
        let required: Vec<_> = schema
            .entries()
            .iter()
            .filter(|e| !e.optional)
            .map(|e| e.key)
            .collect();

        assert_eq!(required, vec![keys::API_URL]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let schema = ConfigSchema::new();
        let err = schema.lookup("pm_tls_insecur").unwrap_err();

        assert!(matches!(err, ConfigError::UnknownKey(ref k) if k == "pm_tls_insecur"));
    }

    #[test]
    fn test_declares_every_connection_key() {
        let schema = ConfigSchema::new();
        for key in [
            keys::API_URL,
            keys::USER,
            keys::PASSWORD,
            keys::API_TOKEN_ID,
            keys::API_TOKEN_SECRET,
            keys::OTP,
            keys::TLS_INSECURE,
            keys::DEBUG,
            keys::TIMEOUT,
            keys::PROXY_SERVER,
            keys::HTTP_HEADERS,
        ] {
            assert!(schema.lookup(key).is_ok(), "missing key {key}");
        }
    }

    #[test]
    fn test_defaults_match_declared_types() {
        for entry in ConfigSchema::new().entries() {
            if let Some(default) = &entry.default {
                assert!(
                    entry.value_type.matches(default),
                    "default of {} does not match {}",
                    entry.key,
                    entry.value_type
                );
            }
        }
    }

    #[test]
    fn test_secrets_are_sensitive() {
        let schema = ConfigSchema::new();
        for key in [keys::PASSWORD, keys::API_TOKEN_SECRET, keys::OTP] {
            assert!(schema.lookup(key).unwrap().sensitive, "{key} must be sensitive");
        }
        assert!(!schema.lookup(keys::USER).unwrap().sensitive);
    }

    #[test]
    fn test_check_rejects_wrong_type_without_echoing_value() {
        let schema = ConfigSchema::new();
        let entry = schema.lookup(keys::PASSWORD).unwrap();

        let err = entry.check(&Value::from(123456)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pm_password"));
        assert!(msg.contains("expected string, got int"));
        assert!(!msg.contains("123456"));
    }

    #[test]
    fn test_map_with_non_string_values_rejected() {
        let value = serde_json::json!({ "X-Test": 1 });
        assert!(!ValueType::Map.matches(&value));
        assert!(ValueType::Map.matches(&serde_json::json!({ "X-Test": "1" })));
    }

    #[test]
    fn test_parse_env_bool() {
        let schema = ConfigSchema::new();
        let entry = schema.lookup(keys::TLS_INSECURE).unwrap();

        assert_eq!(entry.parse_env("true").unwrap(), Value::Bool(true));
        assert_eq!(entry.parse_env("TRUE").unwrap(), Value::Bool(true));
        assert_eq!(entry.parse_env("1").unwrap(), Value::Bool(true));
        assert_eq!(entry.parse_env("0").unwrap(), Value::Bool(false));
        let err = entry.parse_env("yes").unwrap_err();
        assert!(err.to_string().contains("PM_TLS_INSECURE"));
    }

    #[test]
    fn test_parse_env_int() {
        let schema = ConfigSchema::new();
        let entry = schema.lookup(keys::TIMEOUT).unwrap();

        assert_eq!(entry.parse_env("60").unwrap(), Value::from(60));
        assert_eq!(entry.parse_env("-5").unwrap(), Value::from(-5));
        assert!(entry.parse_env("sixty").is_err());
    }

    #[test]
    fn test_parse_env_headers() {
        let schema = ConfigSchema::new();
        let entry = schema.lookup(keys::HTTP_HEADERS).unwrap();

        let value = entry.parse_env("X-One,1,X-Two,2").unwrap();
        assert_eq!(value, serde_json::json!({ "X-One": "1", "X-Two": "2" }));
        assert!(entry.parse_env("X-One,1,X-Two").is_err());
    }
}
