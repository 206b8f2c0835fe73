//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use secrecy::SecretString;

// Re-export commonly used types for test convenience
#[allow(unused_imports)]
pub use pve_client::{ClientBuilder, ClientError, ClientHandle, CredentialMode, ErrorKind};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_ID: &str = "terraform@pve!provider";
pub const TOKEN_SECRET: &str = "3f1c9a57-token-secret";
pub const USER: &str = "root@pam";
pub const PASSWORD: &str = "hunter2-password";

pub fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into())
}

/// API URL of a mock server, shaped like a real endpoint.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/api2/json", server.uri())
}

/// Builder in token mode against a mock server.
#[allow(dead_code)]
pub fn token_builder(server: &MockServer) -> ClientBuilder {
    ClientBuilder::new()
        .api_url(api_url(server))
        .api_token(TOKEN_ID, secret(TOKEN_SECRET))
        .allow_plain_http(true)
}

/// Builder in password mode against a mock server.
#[allow(dead_code)]
pub fn password_builder(server: &MockServer) -> ClientBuilder {
    ClientBuilder::new()
        .api_url(api_url(server))
        .password_auth(USER, secret(PASSWORD))
        .allow_plain_http(true)
}

#[allow(dead_code)]
pub fn ticket_body() -> serde_json::Value {
    serde_json::json!({
        "data": {
            "ticket": "PVE:root@pam:66AA1B2C::sig",
            "CSRFPreventionToken": "66AA1B2C:csrf",
            "username": "root@pam",
            "cap": {}
        }
    })
}

#[allow(dead_code)]
pub fn version_body() -> serde_json::Value {
    serde_json::json!({
        "data": { "version": "8.2.4", "release": "8.2", "repoid": "faa83925" }
    })
}
