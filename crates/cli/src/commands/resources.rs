//! `resources`: list registered resource and data source names.

use anyhow::Result;
use pve_provider::ProviderRegistry;
use serde_json::json;

use crate::args::OutputFormat;

pub fn run(registry: &ProviderRegistry, output: OutputFormat) -> Result<String> {
    let resources = registry.qualified_resource_names();
    let data_sources = registry.qualified_data_source_names();

    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "resources": resources,
            "data_sources": data_sources,
        }))?),
        OutputFormat::Text => {
            let mut out = String::from("Resources:\n");
            for name in &resources {
                out.push_str(&format!("  {name}\n"));
            }
            out.push_str("Data sources:\n");
            for name in &data_sources {
                out.push_str(&format!("  {name}\n"));
            }
            Ok(out)
        }
    }
}
