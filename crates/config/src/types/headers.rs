//! Extra HTTP headers attached to every API request.
//!
//! Responsibilities:
//! - Hold header name/value pairs supplied by the user.
//! - Parse the `Name,Value,Name2,Value2` list form used by `PM_HTTP_HEADERS`.
//!
//! Does NOT handle:
//! - HTTP header name/value syntax validation (see the client crate's transport).
//!
//! Invariants:
//! - Header values may carry credentials; `Debug` prints names only and parse
//!   errors never include the input.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Extra headers keyed by header name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ExtraHeaders(BTreeMap<String, String>);

impl ExtraHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-separated `Name,Value,...` list form.
    ///
    /// Surrounding whitespace is trimmed from every item. A blank input yields
    /// an empty set.
    pub fn parse_list(raw: &str) -> Result<Self, String> {
        if raw.trim().is_empty() {
            return Ok(Self::new());
        }

        let items: Vec<&str> = raw.split(',').map(str::trim).collect();
        if items.len() % 2 != 0 {
            return Err(format!(
                "must be a comma-separated list of name,value pairs (got {} items)",
                items.len()
            ));
        }

        let mut headers = Self::new();
        for pair in items.chunks(2) {
            if pair[0].is_empty() {
                return Err("header names must not be empty".to_string());
            }
            headers.insert(pair[0], pair[1]);
        }
        Ok(headers)
    }

    /// Build from a JSON object of string values; non-string values are skipped.
    pub fn from_json(value: &Value) -> Self {
        value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(name, value)| value.as_str().map(|v| (name.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect(),
        )
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for ExtraHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|name| (name, "[REDACTED]")))
            .finish()
    }
}
