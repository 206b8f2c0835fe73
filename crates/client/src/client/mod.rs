//! Authenticated Proxmox API client.
//!
//! # Submodules
//! - [`builder`]: Validation of the connection config and the connection handshake
//! - `session`: Authentication header assembly (private module)
//!
//! # What this module does NOT handle:
//! - Direct HTTP request classification (delegated to [`crate::endpoints`])
//! - Credential resolution (delegated to [`crate::auth::Credentials`])
//!
//! # Invariants
//! - A [`ClientHandle`] only exists after a successful handshake
//! - A handle is immutable and safe to share across threads
//! - Tickets are not renewed; a handle lives for one provider session

pub mod builder;
mod session;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use tracing::debug;

use crate::auth::{CredentialMode, Credentials};
use crate::endpoints;
use crate::error::Result;
use crate::models::VersionInfo;
use crate::tls::TrustPolicy;
use crate::transport::TransportSettings;

pub use builder::{ClientBuilder, PreparedClient};

/// Ready-to-use client bound to one Proxmox endpoint and one identity.
#[derive(Debug)]
pub struct ClientHandle {
    http: reqwest::Client,
    api_url: String,
    credentials: Credentials,
    transport: TransportSettings,
    auth_headers: HeaderMap,
    csrf_token: Option<HeaderValue>,
    server_version: Option<VersionInfo>,
}

impl ClientHandle {
    /// Create a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Normalized API URL without trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn credential_mode(&self) -> CredentialMode {
        self.credentials.mode()
    }

    /// The user or token ID this client acts as.
    pub fn principal(&self) -> &str {
        self.credentials.principal()
    }

    pub fn trust_policy(&self) -> TrustPolicy {
        self.transport.trust_policy()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    pub fn debug(&self) -> bool {
        self.transport.debug()
    }

    /// Server version; known after a token handshake.
    pub fn server_version(&self) -> Option<&VersionInfo> {
        self.server_version.as_ref()
    }

    /// Start an authenticated request to a path below the API URL.
    ///
    /// State-changing methods also carry the CSRF prevention token in ticket mode.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_url, path.trim_start_matches('/'));
        if self.transport.debug() {
            debug!("{} {}", method, url);
        }

        let mutating = !matches!(method, Method::GET | Method::HEAD | Method::OPTIONS);
        let mut builder = self
            .http
            .request(method, url)
            .headers(self.auth_headers.clone());
        if mutating && let Some(csrf) = &self.csrf_token {
            builder = builder.header(session::CSRF_HEADER, csrf.clone());
        }
        builder
    }

    /// Send a request built by [`ClientHandle::request`] and classify the outcome.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        endpoints::send_request(builder, self.transport.timeout()).await
    }
}
