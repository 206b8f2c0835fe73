//! Logging setup from the provider's logging settings.
//!
//! Responsibilities:
//! - Turn `pm_log_levels` into `EnvFilter` directives.
//! - Install a `tracing` subscriber writing to stderr or to `pm_log_file`.
//!
//! Invariants:
//! - `_default` sets the global level; other keys starting with `_` are ignored.
//! - A valid `RUST_LOG` overrides the configured levels.
//! - Subscriber installation happens at most once per process; a second call
//!   returns [`ProviderError::LoggingInit`].

use std::fs::OpenOptions;
use std::str::FromStr;

use pve_config::LoggingConfig;
use pve_config::constants::DEFAULT_LOG_LEVEL;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::ProviderError;

/// Key in `pm_log_levels` that sets the global level.
pub const DEFAULT_LEVEL_KEY: &str = "_default";

/// Output format of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Keeps the file writer flushing; hold it until shutdown.
#[derive(Debug)]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Build `EnvFilter` directives from per-module levels.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidLogLevel`] for an unrecognized level.
pub fn directives(config: &LoggingConfig) -> Result<Vec<String>, ProviderError> {
    let default_level = config
        .levels
        .get(DEFAULT_LEVEL_KEY)
        .map(String::as_str)
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let mut directives = vec![parse_level(DEFAULT_LEVEL_KEY, default_level)?];
    for (module, level) in &config.levels {
        if module.starts_with('_') {
            continue;
        }
        directives.push(format!("{}={}", module, parse_level(module, level)?));
    }
    Ok(directives)
}

/// Build the filter for a logging configuration.
///
/// A valid `RUST_LOG` takes precedence over the configured levels.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ProviderError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let joined = directives(config)?.join(",");
    EnvFilter::try_new(&joined).map_err(|e| ProviderError::LoggingInit(e.to_string()))
}

/// Install the global subscriber.
///
/// With `enabled` set, events are appended to `file`; otherwise they go to stderr.
pub fn init(config: &LoggingConfig, format: LogFormat) -> Result<LogGuard, ProviderError> {
    let filter = env_filter(config)?;

    if !config.enabled {
        let result = match format {
            LogFormat::Text => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
        };
        result.map_err(|e| ProviderError::LoggingInit(e.to_string()))?;
        return Ok(LogGuard { _guard: None });
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|source| ProviderError::LogFile {
            path: config.file.clone(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let result = match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
    };
    result.map_err(|e| ProviderError::LoggingInit(e.to_string()))?;

    Ok(LogGuard {
        _guard: Some(guard),
    })
}

fn parse_level(module: &str, level: &str) -> Result<String, ProviderError> {
    LevelFilter::from_str(level.trim())
        .map(|filter| filter.to_string().to_lowercase())
        .map_err(|_| ProviderError::InvalidLogLevel {
            module: module.to_string(),
            level: level.to_string(),
        })
}
