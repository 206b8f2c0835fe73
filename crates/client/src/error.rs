//! Error types for the Proxmox client.
//!
//! Every failure is classified into one of three kinds (see [`ErrorKind`]):
//! configuration problems caught locally, credential rejection by the server,
//! and everything that prevents a usable exchange with the server.

use std::time::Duration;

use pve_config::ConfigError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, missing or ambiguous configuration; detected before any request.
    Config,
    /// The server was reached but rejected the credentials.
    Auth,
    /// The server could not be reached or did not complete the exchange.
    Network,
}

/// Errors that can occur while building or using a Proxmox client.
///
/// No variant ever carries a password, token secret, OTP or header value.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Connection, DNS or proxy failure.
    #[error("Network error: {0}")]
    Network(String),

    /// TLS/SSL error, including certificate verification failures.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Unexpected non-success response from the API.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Invalid response format from the API.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::AuthFailed(_) => ErrorKind::Auth,
            Self::Network(_)
            | Self::Tls(_)
            | Self::Timeout(_)
            | Self::ApiError { .. }
            | Self::InvalidResponse(_) => ErrorKind::Network,
        }
    }

    /// Check if this error indicates invalid configuration.
    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    /// Check if this error indicates a connectivity or protocol failure.
    pub fn is_network_error(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// Classify a transport-level `reqwest` failure.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return Self::Timeout(timeout);
        }

        // Classify on the chain without the request URL; host names and paths
        // may contain any of the marker words.
        let url = err.url().map(|url| url.to_string());
        let description = describe(&err.without_url());
        let lowered = description.to_ascii_lowercase();
        let is_tls = ["certificate", "tls", "handshake"]
            .iter()
            .any(|marker| lowered.contains(marker));

        let message = match url {
            Some(url) => format!("{description} ({url})"),
            None => description,
        };
        if is_tls {
            Self::Tls(message)
        } else {
            Self::Network(message)
        }
    }
}

/// Render an error with its full source chain, skipping repeated messages.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !parts.iter().any(|p| p.contains(&message)) {
            parts.push(message);
        }
        source = cause.source();
    }
    parts.join(": ")
}
