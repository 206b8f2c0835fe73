//! Password login.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::Ticket;
use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::models::{ApiResponse, TicketData};

/// Exchange user and password (and optional OTP) for a ticket.
pub async fn request_ticket(
    client: &Client,
    api_url: &str,
    user: &str,
    password: &SecretString,
    otp: Option<&SecretString>,
    timeout: Duration,
) -> Result<Ticket> {
    let url = format!("{}/access/ticket", api_url);
    debug!("Requesting ticket for {}", user);

    let mut form = vec![("username", user), ("password", password.expose_secret())];
    if let Some(otp) = otp {
        form.push(("otp", otp.expose_secret()));
    }

    let response = send_request(client.post(&url).form(&form), timeout).await?;
    let body: ApiResponse<TicketData> = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("ticket response: {e}")))?;
    let data = body.data;

    if data.needs_second_factor() {
        return Err(ClientError::AuthFailed(format!(
            "{} requires a second factor; set pm_otp",
            user
        )));
    }
    if data.ticket.is_empty() {
        return Err(ClientError::InvalidResponse(
            "ticket response contained an empty ticket".to_string(),
        ));
    }

    Ok(Ticket::new(
        SecretString::new(data.ticket.into()),
        SecretString::new(data.csrf_prevention_token.into()),
        data.username,
    ))
}
