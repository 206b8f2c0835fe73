//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate connection flags into `ConfigLoader` builder calls.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `PM_*` variables itself; the loader's environment fallback does.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pve_config::{ConfigLoader, ExtraHeaders};

#[derive(Parser)]
#[command(name = "pve-provider")]
#[command(about = "Inspect and check the Proxmox VE provider configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  pve-provider schema\n  pve-provider resources --output json\n  PM_API_URL=https://pve:8006/api2/json PM_API_TOKEN_ID='terraform@pve!ci' PM_API_TOKEN_SECRET=... pve-provider check\n"
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log event format
    #[arg(long, global = true, value_enum, env = "PM_LOG_FORMAT", default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection overrides; anything not given falls back to `PM_*` variables.
#[derive(clap::Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Proxmox VE API URL (e.g., https://pve.example.com:8006/api2/json)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// User in name@realm form
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// API token ID in name@realm!tokenname form
    #[arg(long, global = true)]
    pub token_id: Option<String>,

    /// Accept any server certificate
    #[arg(long, global = true)]
    pub tls_insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Proxy server URL
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Extra header as NAME=VALUE (repeatable)
    #[arg(long = "header", global = true, value_name = "NAME=VALUE")]
    pub headers: Vec<String>,

    /// Log every API request
    #[arg(long, global = true)]
    pub debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl ConnectionArgs {
    /// Apply the flags that were given to a loader.
    pub fn apply(&self, mut loader: ConfigLoader) -> anyhow::Result<ConfigLoader> {
        if let Some(url) = &self.api_url {
            loader = loader.with_api_url(url.clone());
        }
        if let Some(user) = &self.user {
            loader = loader.with_user(user.clone());
        }
        if let Some(token_id) = &self.token_id {
            loader = loader.with_token_id(token_id.clone());
        }
        if self.tls_insecure {
            loader = loader.with_tls_insecure(true);
        }
        if let Some(timeout) = self.timeout {
            loader = loader.with_timeout_seconds(timeout);
        }
        if let Some(proxy) = &self.proxy {
            loader = loader.with_proxy_url(proxy.clone());
        }
        if !self.headers.is_empty() {
            loader = loader.with_headers(parse_headers(&self.headers)?);
        }
        if self.debug {
            loader = loader.with_debug(true);
        }
        if let Some(path) = &self.log_file {
            loader = loader.with_log_enable(true).with_log_file(path.clone());
        }
        Ok(loader)
    }
}

fn parse_headers(raw: &[String]) -> anyhow::Result<ExtraHeaders> {
    raw.iter()
        .map(|item| match item.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => Err(anyhow::anyhow!(
                "--header expects NAME=VALUE (got an item without a name)"
            )),
        })
        .collect()
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every provider configuration key
    Schema,

    /// List the resource and data source names the provider registers
    Resources,

    /// Resolve the configuration and authenticate against the API
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for pve_provider::logging::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}
