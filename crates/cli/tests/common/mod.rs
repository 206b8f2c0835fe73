//! Shared test utilities for pve-provider CLI integration tests.
//!
//! Invariants / Assumptions:
//! - Every command is hermetic: no `.env` loading and no `PM_*` variables
//!   inherited from the host.

use assert_cmd::Command;

const PM_VARS: &[&str] = &[
    "PM_API_URL",
    "PM_USER",
    "PM_PASS",
    "PM_API_TOKEN_ID",
    "PM_API_TOKEN_SECRET",
    "PM_OTP",
    "PM_TLS_INSECURE",
    "PM_DEBUG",
    "PM_TIMEOUT",
    "PM_PROXY",
    "PM_HTTP_HEADERS",
    "PM_LOG_ENABLE",
    "PM_LOG_FILE",
    "PM_LOG_FORMAT",
];

/// Returns a hermetic `pve-provider` command for integration testing.
pub fn pve_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pve-provider");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("RUST_LOG", "off");

    for var in PM_VARS {
        cmd.env_remove(var);
    }

    cmd
}
