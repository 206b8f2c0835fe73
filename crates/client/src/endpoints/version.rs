//! Server version lookup, used as the token-mode handshake.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::models::{ApiResponse, VersionInfo};

/// Fetch `/version` with the given authentication headers.
pub async fn get_version(
    client: &Client,
    api_url: &str,
    auth_headers: &HeaderMap,
    timeout: Duration,
) -> Result<VersionInfo> {
    let url = format!("{}/version", api_url);
    debug!("Fetching server version");

    let response =
        send_request(client.get(&url).headers(auth_headers.clone()), timeout).await?;
    let body: ApiResponse<VersionInfo> = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("version response: {e}")))?;
    Ok(body.data)
}
