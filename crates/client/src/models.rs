//! Response payloads of the handshake endpoints.

use serde::Deserialize;

/// Every Proxmox API response wraps its payload in `data`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Payload of `POST /access/ticket`.
#[derive(Deserialize)]
pub struct TicketData {
    pub ticket: String,
    #[serde(rename = "CSRFPreventionToken")]
    pub csrf_prevention_token: String,
    pub username: String,
    /// Set when the realm requires a second factor that was not supplied.
    #[serde(rename = "NeedTFA", default)]
    pub need_tfa: Option<u8>,
}

impl TicketData {
    pub fn needs_second_factor(&self) -> bool {
        self.need_tfa.is_some_and(|v| v != 0)
    }
}

/// Payload of `GET /version`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub repoid: Option<String>,
}
