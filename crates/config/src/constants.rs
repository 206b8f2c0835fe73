//! Centralized constants for the Proxmox provider workspace.
//!
//! This module contains configuration key names, environment variable names,
//! and default values shared across crates.

// =============================================================================
// Configuration Keys
// =============================================================================

/// Names of the recognized provider configuration keys.
pub mod keys {
    /// Proxmox VE API endpoint, e.g. `https://pve.example.com:8006/api2/json`.
    pub const API_URL: &str = "pm_api_url";
    /// User to authenticate as, in `name@realm` form.
    pub const USER: &str = "pm_user";
    /// Password for [`USER`].
    pub const PASSWORD: &str = "pm_password";
    /// API token ID, in `name@realm!tokenname` form.
    pub const API_TOKEN_ID: &str = "pm_api_token_id";
    /// Secret belonging to [`API_TOKEN_ID`].
    pub const API_TOKEN_SECRET: &str = "pm_api_token_secret";
    /// One-time password for two-factor login.
    pub const OTP: &str = "pm_otp";
    /// Accept any server certificate.
    pub const TLS_INSECURE: &str = "pm_tls_insecure";
    /// Verbose request logging.
    pub const DEBUG: &str = "pm_debug";
    /// Request timeout in seconds.
    pub const TIMEOUT: &str = "pm_timeout";
    /// Proxy server URL.
    pub const PROXY_SERVER: &str = "pm_proxy_server";
    /// Extra HTTP headers sent with every request.
    pub const HTTP_HEADERS: &str = "pm_http_headers";
    /// Write provider logs to a file.
    pub const LOG_ENABLE: &str = "pm_log_enable";
    /// Log file path.
    pub const LOG_FILE: &str = "pm_log_file";
    /// Per-module log levels.
    pub const LOG_LEVELS: &str = "pm_log_levels";
}

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable fallbacks, consulted only when a key is absent.
pub mod env {
    pub const API_URL: &str = "PM_API_URL";
    pub const USER: &str = "PM_USER";
    pub const PASSWORD: &str = "PM_PASS";
    pub const API_TOKEN_ID: &str = "PM_API_TOKEN_ID";
    pub const API_TOKEN_SECRET: &str = "PM_API_TOKEN_SECRET";
    pub const OTP: &str = "PM_OTP";
    pub const TLS_INSECURE: &str = "PM_TLS_INSECURE";
    pub const DEBUG: &str = "PM_DEBUG";
    pub const TIMEOUT: &str = "PM_TIMEOUT";
    pub const PROXY_SERVER: &str = "PM_PROXY";
    pub const HTTP_HEADERS: &str = "PM_HTTP_HEADERS";
    pub const LOG_ENABLE: &str = "PM_LOG_ENABLE";
    pub const LOG_FILE: &str = "PM_LOG_FILE";
}

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 300;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Logging Defaults
// =============================================================================

/// Default log file used when file logging is enabled.
pub const DEFAULT_LOG_FILE: &str = "terraform-plugin-proxmox.log";

/// Default level applied when no per-module level is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";
