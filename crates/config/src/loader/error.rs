//! Error types for configuration loading and validation.
//!
//! Responsibilities:
//! - Define error variants for every local configuration failure: unknown keys,
//!   malformed values, missing or ambiguous credentials, bad timeouts, proxies and headers.
//!
//! Does NOT handle:
//! - Network or authentication failures (see client crate).
//!
//! Invariants:
//! - Variants carry key names, variable names, user names and token IDs, never
//!   passwords, token secrets, OTPs, header values or proxy URLs.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors detected locally, before any network round-trip.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} is required. Set it in the provider configuration{}", .env.as_ref().map(|v| format!(" or via {v}")).unwrap_or_default())]
    MissingRequired { key: String, env: Option<String> },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid API URL: {message}")]
    InvalidApiUrl { message: String },

    #[error(
        "No usable credentials: set pm_user and pm_password, or pm_api_token_id and pm_api_token_secret"
    )]
    MissingCredentials,

    #[error(
        "Ambiguous credentials: both an API token and a password were supplied; configure exactly one"
    )]
    AmbiguousCredentials,

    #[error("Incomplete API token: {missing} is not set")]
    IncompleteToken { missing: &'static str },

    #[error("pm_password is required when authenticating as {user}")]
    MissingPassword { user: String },

    #[error("pm_user is required when pm_password is set")]
    MissingUser,

    #[error("pm_otp can only be used with password authentication")]
    OtpWithToken,

    #[error("Invalid user '{0}': expected name@realm (e.g. root@pam)")]
    InvalidUser(String),

    #[error("Invalid API token ID '{0}': expected name@realm!tokenname (e.g. terraform@pve!provider)")]
    InvalidTokenId(String),

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    /// The proxy URL is not echoed because it may embed credentials.
    #[error("Invalid proxy server: {message}")]
    InvalidProxy { message: String },

    /// Only the header name is reported; values may be credentials.
    #[error("Invalid HTTP header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
