//! Authenticated client construction for the Proxmox VE API.
//!
//! This crate turns a resolved [`pve_config::ConnectionConfig`] into a
//! [`ClientHandle`]: it validates the configuration locally, assembles the
//! HTTP transport, and performs one authentication handshake, either a ticket
//! login with user and password or a version request with an API token.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod tls;
mod transport;

pub use auth::{CredentialMode, Credentials, Ticket};
pub use client::{ClientBuilder, ClientHandle, PreparedClient};
pub use error::{ClientError, ErrorKind, Result};
pub use models::VersionInfo;
pub use tls::TrustPolicy;
pub use transport::TransportSettings;

use pve_config::ConnectionConfig;

/// Build an authenticated client from a connection config.
///
/// # Errors
///
/// See [`ClientBuilder::build`].
pub async fn build_client(config: &ConnectionConfig) -> Result<ClientHandle> {
    ClientBuilder::from_config(config).build().await
}
