//! `check`: resolve the configuration and authenticate against the API.
//!
//! Responsibilities:
//! - Build the client from an already resolved configuration.
//! - Report the endpoint, identity, credential mode and trust policy.
//!
//! Does NOT handle:
//! - Configuration resolution (done in `dispatch` so logging can use it).

use anyhow::Result;
use pve_client::{ClientHandle, CredentialMode};
use pve_config::Config;
use pve_provider::ProviderError;
use serde_json::json;
use tracing::info;

use crate::args::OutputFormat;

pub async fn run(config: &Config, output: OutputFormat) -> Result<String> {
    let client = pve_client::build_client(&config.connection)
        .await
        .map_err(ProviderError::from)?;
    info!("Check succeeded for {}", client.api_url());
    Ok(render(&client, output)?)
}

fn render(client: &ClientHandle, output: OutputFormat) -> serde_json::Result<String> {
    let mode = match client.credential_mode() {
        CredentialMode::Password => "password",
        CredentialMode::ApiToken => "api_token",
    };
    let version = client.server_version().map(|v| v.version.as_str());

    match output {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "api_url": client.api_url(),
            "principal": client.principal(),
            "credential_mode": mode,
            "trust_policy": client.trust_policy().to_string(),
            "server_version": version,
        })),
        OutputFormat::Text => {
            let mut out = format!(
                "OK: authenticated to {} as {} ({mode})\nTLS: {}\n",
                client.api_url(),
                client.principal(),
                client.trust_policy()
            );
            if let Some(version) = version {
                out.push_str(&format!("Server version: {version}\n"));
            }
            Ok(out)
        }
    }
}
