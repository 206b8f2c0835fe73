//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map error kinds from the config, client and provider crates to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Configuration errors always map to `ValidationError`, whichever crate raised them.

use pve_client::{ClientError, ErrorKind};
use pve_config::ConfigError;
use pve_provider::ProviderError;

/// Structured exit codes for pve-provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - the server rejected the credentials.
    ///
    /// Scripts should fix the credentials rather than retry.
    AuthenticationFailed = 2,

    /// Connection error - network, TLS, timeout, or unexpected server response.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Validation error - malformed, missing or conflicting configuration.
    ///
    /// Scripts should fix the input and not retry.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<ErrorKind> for ExitCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Config => ExitCode::ValidationError,
            ErrorKind::Auth => ExitCode::AuthenticationFailed,
            ErrorKind::Network => ExitCode::ConnectionError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        err.kind().into()
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no classified error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<ProviderError>() {
                return err.kind().map(ExitCode::from).unwrap_or(ExitCode::GeneralError);
            }
            if let Some(err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ValidationError;
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use pve_provider::RegistryError;
    use std::time::Duration;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::ConnectionError.as_i32(), 3);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
    }

    #[test]
    fn test_from_client_errors() {
        assert_eq!(
            ExitCode::from(&ClientError::AuthFailed("rejected".to_string())),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::Timeout(Duration::from_secs(5))),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::Config(ConfigError::MissingCredentials)),
            ExitCode::ValidationError
        );
    }

    #[test]
    fn test_anyhow_chain_lookup() {
        let err = anyhow::Error::new(ProviderError::from(ClientError::Network(
            "connection refused".to_string(),
        )))
        .context("check failed");
        assert_eq!(err.exit_code(), ExitCode::ConnectionError);

        let err = anyhow::Error::new(ConfigError::AmbiguousCredentials);
        assert_eq!(err.exit_code(), ExitCode::ValidationError);

        let err = anyhow::Error::new(ProviderError::from(RegistryError::MissingResource(
            "lxc".to_string(),
        )));
        assert_eq!(err.exit_code(), ExitCode::GeneralError);

        let err: anyhow::Error = Err::<(), _>(std::io::Error::other("disk full"))
            .context("writing output")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
