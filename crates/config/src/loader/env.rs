//! Environment variable fallbacks for configuration.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Fill absent schema keys from their declared fallback variables.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - A fallback is read only when the key has no value yet.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid typed values return ConfigError::InvalidValue naming the variable.

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment fallbacks to every key the loader does not have yet.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let fallbacks: Vec<_> = loader
        .schema()
        .entries()
        .iter()
        .filter(|entry| !loader.contains(entry.key))
        .filter_map(|entry| entry.env_var.map(|var| (entry.clone(), var)))
        .collect();

    for (entry, var) in fallbacks {
        if let Some(raw) = env_var_or_none(var) {
            let value = entry.parse_env(&raw)?;
            tracing::debug!(key = entry.key, var, "using environment fallback");
            loader.insert(entry.key, value);
        }
    }

    Ok(())
}
