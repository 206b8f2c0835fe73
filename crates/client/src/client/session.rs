//! Authentication headers for an established session.
//!
//! Token mode sends `Authorization: PVEAPIToken=<id>=<secret>` with every
//! request. Ticket mode sends the ticket cookie with every request and the
//! CSRF prevention token with every state-changing request.

use pve_config::ConfigError;
use pve_config::constants::keys;
use reqwest::header::{AUTHORIZATION, COOKIE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::auth::{Credentials, Ticket};
use crate::error::{ClientError, Result};

/// Header carrying the CSRF prevention token.
pub(crate) const CSRF_HEADER: &str = "CSRFPreventionToken";

/// Headers for token mode; empty for password mode.
pub(crate) fn token_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(value) = credentials.token_authorization() {
        let value = sensitive_value(&value).ok_or_else(|| {
            ClientError::Config(ConfigError::InvalidValue {
                var: keys::API_TOKEN_SECRET.to_string(),
                message: "contains characters not allowed in HTTP headers".to_string(),
            })
        })?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Cookie header and CSRF token value for a ticket.
pub(crate) fn ticket_headers(ticket: &Ticket) -> Result<(HeaderMap, HeaderValue)> {
    let invalid =
        || ClientError::InvalidResponse("ticket contains characters not allowed in HTTP headers".into());

    let cookie = sensitive_value(&ticket.cookie()).ok_or_else(invalid)?;
    let csrf = sensitive_value(&ticket.csrf_token).ok_or_else(invalid)?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, cookie);
    Ok((headers, csrf))
}

fn sensitive_value(value: &SecretString) -> Option<HeaderValue> {
    let mut header = HeaderValue::from_str(value.expose_secret()).ok()?;
    header.set_sensitive(true);
    Some(header)
}
