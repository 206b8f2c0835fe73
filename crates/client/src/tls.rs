//! Server certificate trust policy.
//!
//! The policy is derived from the single `pm_tls_insecure` flag and applied
//! when the HTTP transport is assembled.

use std::fmt;

/// How the server's TLS certificate is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrustPolicy {
    /// Verify the certificate chain and hostname against the platform trust store.
    #[default]
    Default,
    /// Accept any certificate, including self-signed and expired ones.
    AcceptAnyCertificate,
}

impl TrustPolicy {
    /// Select the policy for the `tls_insecure` flag.
    pub fn from_insecure(insecure: bool) -> Self {
        if insecure {
            Self::AcceptAnyCertificate
        } else {
            Self::Default
        }
    }

    /// Whether certificate verification is disabled.
    pub fn accepts_any_certificate(self) -> bool {
        self == Self::AcceptAnyCertificate
    }

    pub(crate) fn apply(self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        match self {
            Self::Default => builder,
            Self::AcceptAnyCertificate => builder.danger_accept_invalid_certs(true),
        }
    }
}

impl fmt::Display for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "verify"),
            Self::AcceptAnyCertificate => write!(f, "accept-any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_verifies() {
        assert_eq!(TrustPolicy::default(), TrustPolicy::Default);
        assert!(!TrustPolicy::default().accepts_any_certificate());
    }

    #[test]
    fn test_from_insecure() {
        assert_eq!(TrustPolicy::from_insecure(false), TrustPolicy::Default);
        assert_eq!(
            TrustPolicy::from_insecure(true),
            TrustPolicy::AcceptAnyCertificate
        );
        assert!(TrustPolicy::from_insecure(true).accepts_any_certificate());
    }

    #[test]
    fn test_apply_builds_for_both_policies() {
        for policy in [TrustPolicy::Default, TrustPolicy::AcceptAnyCertificate] {
            let client = policy.apply(reqwest::Client::builder()).build();
            assert!(client.is_ok(), "policy {policy} should build");
        }
    }
}
