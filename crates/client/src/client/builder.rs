//! Client builder for constructing [`ClientHandle`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API over a [`ConnectionConfig`]
//! - Validating the API URL, credentials, timeout, proxy and headers before any I/O
//! - Normalizing the API URL (removing trailing slashes)
//! - Performing exactly one authentication handshake
//!
//! # What this module does NOT handle:
//! - Requests after the handshake (handled by [`ClientHandle`] methods in `mod.rs`)
//! - Response classification (handled by [`crate::endpoints`])
//!
//! # Invariants
//! - Every configuration error is reported before the first network request
//! - The API URL must use https; plain http is only accepted when explicitly
//!   allowed, which `from_config` never does
//! - `tls_insecure` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use pve_config::constants::{env, keys};
use pve_config::{ConfigError, ConnectionConfig};
use reqwest::header::HeaderMap;
use secrecy::SecretString;
use tracing::{info, warn};
use url::Url;

use crate::auth::{CredentialMode, Credentials};
use crate::client::{ClientHandle, session};
use crate::endpoints;
use crate::error::Result;
use crate::tls::TrustPolicy;
use crate::transport::TransportSettings;

/// Builder for creating a new [`ClientHandle`].
///
/// # Example
///
/// ```rust,ignore
/// use pve_client::ClientHandle;
/// use secrecy::SecretString;
///
/// let client = ClientHandle::builder()
///     .api_url("https://pve.example.com:8006/api2/json")
///     .api_token(
///         "terraform@pve!provider",
///         SecretString::new("secret".to_string().into()),
///     )
///     .timeout_seconds(60)
///     .build()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ConnectionConfig,
    allow_plain_http: bool,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a resolved connection config.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self {
            config: config.clone(),
            allow_plain_http: false,
        }
    }

    /// Set the API URL, e.g. `https://pve.example.com:8006/api2/json`.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Authenticate with user and password.
    pub fn password_auth(mut self, user: impl Into<String>, password: SecretString) -> Self {
        self.config.user = Some(user.into());
        self.config.password = Some(password);
        self
    }

    /// Authenticate with an API token.
    pub fn api_token(mut self, token_id: impl Into<String>, secret: SecretString) -> Self {
        self.config.token_id = Some(token_id.into());
        self.config.token_secret = Some(secret);
        self
    }

    /// Set the one-time password sent with a password login.
    pub fn otp(mut self, otp: SecretString) -> Self {
        self.config.otp = Some(otp);
        self
    }

    /// Accept any server certificate.
    pub fn tls_insecure(mut self, insecure: bool) -> Self {
        self.config.tls_insecure = insecure;
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_seconds(mut self, secs: i64) -> Self {
        self.config.timeout_seconds = secs;
        self
    }

    /// Route all requests through an HTTP(S) proxy.
    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.extra_headers.insert(name, value);
        self
    }

    /// Log every request at debug level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Accept `http://` API URLs.
    ///
    /// Only meant for tests against local mock servers.
    pub fn allow_plain_http(mut self, allow: bool) -> Self {
        self.allow_plain_http = allow;
        self
    }

    /// Validate everything that can be checked without the network.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` for any invalid setting.
    pub fn prepare(self) -> Result<PreparedClient> {
        let api_url = normalize_api_url(&self.config.api_url, self.allow_plain_http)?;
        let credentials = Credentials::resolve(&self.config)?;
        let transport = TransportSettings::from_config(&self.config)?;
        let auth_headers = session::token_headers(&credentials)?;

        if transport.trust_policy().accepts_any_certificate() {
            if api_url.starts_with("https://") {
                warn!(
                    "TLS certificate verification is disabled for {}. Any server certificate will be accepted.",
                    api_url
                );
            } else {
                warn!(
                    "tls_insecure=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = transport.build_http_client()?;

        Ok(PreparedClient {
            http,
            api_url,
            credentials,
            transport,
            auth_headers,
        })
    }

    /// Validate the configuration and perform the authentication handshake.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` before any request when the configuration
    /// is invalid, `ClientError::AuthFailed` when the server rejects the
    /// credentials, and a network-class error otherwise.
    pub async fn build(self) -> Result<ClientHandle> {
        self.prepare()?.connect().await
    }
}

/// A fully validated client that has not contacted the server yet.
#[derive(Debug)]
pub struct PreparedClient {
    http: reqwest::Client,
    api_url: String,
    credentials: Credentials,
    transport: TransportSettings,
    auth_headers: HeaderMap,
}

impl PreparedClient {
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn credential_mode(&self) -> CredentialMode {
        self.credentials.mode()
    }

    pub fn trust_policy(&self) -> TrustPolicy {
        self.transport.trust_policy()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    pub fn transport(&self) -> &TransportSettings {
        &self.transport
    }

    /// Perform the handshake: a ticket login in password mode, a version
    /// request in token mode.
    pub async fn connect(self) -> Result<ClientHandle> {
        let timeout = self.transport.timeout();

        let (auth_headers, csrf_token, server_version) = match &self.credentials {
            Credentials::Password {
                user,
                password,
                otp,
            } => {
                let ticket = endpoints::request_ticket(
                    &self.http,
                    &self.api_url,
                    user,
                    password,
                    otp.as_ref(),
                    timeout,
                )
                .await?;
                let (headers, csrf) = session::ticket_headers(&ticket)?;
                (headers, Some(csrf), None)
            }
            Credentials::ApiToken { .. } => {
                let version =
                    endpoints::get_version(&self.http, &self.api_url, &self.auth_headers, timeout)
                        .await?;
                (self.auth_headers, None, Some(version))
            }
        };

        info!(
            "Connected to {} as {}",
            self.api_url,
            self.credentials.principal()
        );

        Ok(ClientHandle {
            http: self.http,
            api_url: self.api_url,
            credentials: self.credentials,
            transport: self.transport,
            auth_headers,
            csrf_token,
            server_version,
        })
    }
}

/// Validate the API URL and strip trailing slashes.
fn normalize_api_url(raw: &str, allow_plain_http: bool) -> std::result::Result<String, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::MissingRequired {
            key: keys::API_URL.to_string(),
            env: Some(env::API_URL.to_string()),
        });
    }

    let invalid = |message: String| ConfigError::InvalidApiUrl { message };

    let url = Url::parse(raw).map_err(|e| {
        invalid(format!(
            "{e}; expected an absolute URL such as https://pve.example.com:8006/api2/json"
        ))
    })?;

    match url.scheme() {
        "https" => {}
        "http" if allow_plain_http => {}
        other => {
            return Err(invalid(format!(
                "scheme must be https (got {other})"
            )));
        }
    }

    // The URL parser repairs inputs such as `https:///api2/json` by moving the
    // first path segment into the host; require an explicit authority instead.
    let authority = raw
        .get(url.scheme().len()..)
        .and_then(|rest| rest.strip_prefix("://"));
    if authority.is_none_or(|rest| rest.is_empty() || rest.starts_with(['/', '\\'])) {
        return Err(invalid(format!(
            "expected {}://<host>[:port]/<path>",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("URL has no host".to_string()));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("URL must not embed credentials".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("URL must not have a query or fragment".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
