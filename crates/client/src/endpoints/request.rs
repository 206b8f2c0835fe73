//! Request execution and response classification.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Longest response body excerpt carried in an [`ClientError::ApiError`].
const MAX_ERROR_BODY: usize = 512;

/// Send a request and classify the outcome.
///
/// - transport failures become `Network`, `Tls` or `Timeout`
/// - 401 and 403 become `AuthFailed`
/// - any other non-success status becomes `ApiError`
pub async fn send_request(builder: RequestBuilder, timeout: Duration) -> Result<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| ClientError::from_transport(e, timeout))?;

    let status = response.status();
    let url = response.url().to_string();
    debug!("{} {}", status.as_u16(), url);

    if status.is_success() {
        return Ok(response);
    }

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(ClientError::AuthFailed(format!(
            "{} rejected the credentials ({})",
            url,
            status_text(status)
        )));
    }

    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status_text(status),
        text => truncate(text, MAX_ERROR_BODY),
    };
    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
    })
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
