//! TLS configuration security tests.
//!
//! This module tests certificate trust settings to ensure:
//! - Verification is enabled by default (secure-by-default posture)
//! - `tls_insecure=true` selects the accept-any policy
//! - Plain http API URLs are refused unless explicitly allowed
//! - A failed TLS handshake is reported as a network-class error
//!
//! What this module does NOT handle:
//! - Handshakes against servers with self-signed certificates
//! - Certificate pinning or custom CA bundle configuration

mod common;

use common::*;
use pve_client::TrustPolicy;
use pve_config::ConnectionConfig;

fn token_config(url: &str) -> ConnectionConfig {
    ConnectionConfig::with_api_token(url.to_string(), TOKEN_ID.to_string(), secret(TOKEN_SECRET))
}

#[test]
fn test_tls_verification_enabled_by_default() {
    let prepared = ClientBuilder::from_config(&token_config("https://localhost:8006/api2/json"))
        .prepare()
        .unwrap();
    assert_eq!(prepared.trust_policy(), TrustPolicy::Default);
}

#[test]
fn test_tls_insecure_selects_accept_any() {
    let mut config = token_config("https://localhost:8006/api2/json");
    config.tls_insecure = true;
    let prepared = ClientBuilder::from_config(&config).prepare().unwrap();
    assert_eq!(prepared.trust_policy(), TrustPolicy::AcceptAnyCertificate);
}

#[test]
fn test_http_url_rejected_by_default() {
    let err = ClientBuilder::from_config(&token_config("http://localhost:8006/api2/json"))
        .prepare()
        .unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("https"));
}

#[test]
fn test_tls_insecure_on_allowed_http_url_does_not_panic() {
    let prepared = ClientBuilder::from_config(&token_config("http://localhost:8006/api2/json"))
        .tls_insecure(true)
        .allow_plain_http(true)
        .prepare();
    assert!(prepared.is_ok());
}

/// Speaking TLS to a plain-text server fails during the handshake.
#[tokio::test]
async fn test_tls_handshake_failure_is_network_class() {
    let server = MockServer::start().await;
    let https_url = api_url(&server).replacen("http://", "https://", 1);

    let err = ClientBuilder::from_config(&token_config(&https_url))
        .timeout_seconds(5)
        .build()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network, "{err}");
}
