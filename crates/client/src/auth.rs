//! Credential resolution and authentication state.
//!
//! Responsibilities:
//! - Decide which credential mode a [`ConnectionConfig`] selects.
//! - Validate user and token ID shapes before any request is sent.
//! - Hold the ticket obtained by a password login.
//!
//! Does NOT handle:
//! - Performing the login or version handshake (see [`crate::endpoints`]).
//! - Attaching credentials to requests (see [`crate::client::ClientHandle`]).
//!
//! Invariants:
//! - Exactly one mode is selected; mixed or partial credentials are rejected.
//! - Empty strings count as unset.
//! - Passwords, token secrets, OTPs and tickets stay in `SecretString`.

use pve_config::constants::keys;
use pve_config::{ConfigError, ConnectionConfig};
use secrecy::{ExposeSecret, SecretString};

/// Which credential mode a client authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    Password,
    ApiToken,
}

/// Resolved credentials for exactly one mode.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Ticket login with user and password, optionally with a one-time password.
    Password {
        user: String,
        password: SecretString,
        otp: Option<SecretString>,
    },
    /// Stateless API token.
    ApiToken {
        token_id: String,
        secret: SecretString,
    },
}

impl Credentials {
    /// Resolve the credential mode from a connection config.
    ///
    /// A user supplied alongside a complete token pair is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when no mode is complete, when both modes are
    /// supplied, when a token pair is partial, when an OTP accompanies a token,
    /// or when the user or token ID is malformed.
    pub fn resolve(config: &ConnectionConfig) -> Result<Self, ConfigError> {
        let user = non_empty(config.user.as_deref());
        let password = non_empty_secret(config.password.as_ref());
        let token_id = non_empty(config.token_id.as_deref());
        let token_secret = non_empty_secret(config.token_secret.as_ref());
        let otp = non_empty_secret(config.otp.as_ref());

        match (token_id, token_secret) {
            (Some(token_id), Some(secret)) => {
                if password.is_some() {
                    return Err(ConfigError::AmbiguousCredentials);
                }
                if otp.is_some() {
                    return Err(ConfigError::OtpWithToken);
                }
                validate_token_id(token_id)?;
                Ok(Self::ApiToken {
                    token_id: token_id.to_string(),
                    secret: secret.clone(),
                })
            }
            (Some(_), None) => Err(ConfigError::IncompleteToken {
                missing: keys::API_TOKEN_SECRET,
            }),
            (None, Some(_)) => Err(ConfigError::IncompleteToken {
                missing: keys::API_TOKEN_ID,
            }),
            (None, None) => match (user, password) {
                (Some(user), Some(password)) => {
                    validate_user(user)?;
                    Ok(Self::Password {
                        user: user.to_string(),
                        password: password.clone(),
                        otp: otp.cloned(),
                    })
                }
                (Some(user), None) => Err(ConfigError::MissingPassword {
                    user: user.to_string(),
                }),
                (None, Some(_)) => Err(ConfigError::MissingUser),
                (None, None) => Err(ConfigError::MissingCredentials),
            },
        }
    }

    pub fn mode(&self) -> CredentialMode {
        match self {
            Self::Password { .. } => CredentialMode::Password,
            Self::ApiToken { .. } => CredentialMode::ApiToken,
        }
    }

    /// The identity the client acts as: the user or the token ID.
    pub fn principal(&self) -> &str {
        match self {
            Self::Password { user, .. } => user,
            Self::ApiToken { token_id, .. } => token_id,
        }
    }

    /// Value of the `Authorization` header for token mode.
    pub(crate) fn token_authorization(&self) -> Option<SecretString> {
        match self {
            Self::ApiToken { token_id, secret } => Some(SecretString::new(
                format!("PVEAPIToken={}={}", token_id, secret.expose_secret()).into(),
            )),
            Self::Password { .. } => None,
        }
    }
}

/// Authentication ticket returned by a password login.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub(crate) value: SecretString,
    pub(crate) csrf_token: SecretString,
    /// User name as echoed by the server.
    pub username: String,
}

impl Ticket {
    pub fn new(value: SecretString, csrf_token: SecretString, username: String) -> Self {
        Self {
            value,
            csrf_token,
            username,
        }
    }

    /// Value of the `Cookie` header carrying the ticket.
    pub(crate) fn cookie(&self) -> SecretString {
        SecretString::new(format!("PVEAuthCookie={}", self.value.expose_secret()).into())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_empty_secret(value: Option<&SecretString>) -> Option<&SecretString> {
    value.filter(|s| !s.expose_secret().is_empty())
}

/// A user ID is `name@realm`; neither part may be empty or contain whitespace.
fn is_valid_userid(user: &str) -> bool {
    match user.rsplit_once('@') {
        Some((name, realm)) => {
            !name.is_empty()
                && !realm.is_empty()
                && !user.contains('!')
                && !user.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn validate_user(user: &str) -> Result<(), ConfigError> {
    if is_valid_userid(user) {
        Ok(())
    } else {
        Err(ConfigError::InvalidUser(user.to_string()))
    }
}

fn validate_token_id(token_id: &str) -> Result<(), ConfigError> {
    let valid = match token_id.rsplit_once('!') {
        Some((user, name)) => {
            is_valid_userid(user)
                && !name.is_empty()
                && !name.chars().any(|c| c.is_whitespace() || c == '=')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidTokenId(token_id.to_string()))
    }
}
