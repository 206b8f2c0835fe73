//! `schema`: list every configuration key.

use anyhow::Result;
use pve_config::ConfigSchema;
use serde::Serialize;
use serde_json::Value;

use crate::args::OutputFormat;

#[derive(Debug, Serialize)]
struct KeyRow<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    value_type: &'a str,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a str>,
    sensitive: bool,
    description: &'a str,
}

pub fn run(schema: &ConfigSchema, output: OutputFormat) -> Result<String> {
    let rows: Vec<KeyRow<'_>> = schema
        .entries()
        .iter()
        .map(|entry| KeyRow {
            key: entry.key,
            value_type: entry.value_type.as_str(),
            required: !entry.optional,
            default: entry.default.as_ref(),
            env: entry.env_var,
            sensitive: entry.sensitive,
            description: entry.description,
        })
        .collect();

    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => Ok(render_table(&rows)),
    }
}

fn render_table(rows: &[KeyRow<'_>]) -> String {
    let key_width = rows.iter().map(|r| r.key.len()).max().unwrap_or(3).max(3);
    let env_width = rows
        .iter()
        .map(|r| r.env.map_or(1, str::len))
        .max()
        .unwrap_or(3)
        .max(3);

    let mut out = format!(
        "{:<key_width$}  {:<6}  {:<8}  {:<env_width$}  DEFAULT\n",
        "KEY", "TYPE", "REQUIRED", "ENV"
    );
    for row in rows {
        let default = row.default.map(Value::to_string).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<key_width$}  {:<6}  {:<8}  {:<env_width$}  {}\n",
            row.key,
            row.value_type,
            if row.required { "yes" } else { "no" },
            row.env.unwrap_or("-"),
            default
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lists_every_key() {
        let schema = ConfigSchema::new();
        let text = run(&schema, OutputFormat::Text).unwrap();
        for key in schema.keys() {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(text.contains("PM_PASS"));
    }

    #[test]
    fn test_json_rows() {
        let json = run(&ConfigSchema::new(), OutputFormat::Json).unwrap();
        let rows: Vec<Value> = serde_json::from_str(&json).unwrap();
        let url = rows.iter().find(|r| r["key"] == "pm_api_url").unwrap();
        assert_eq!(url["required"], true);
        assert_eq!(url["env"], "PM_API_URL");
        let timeout = rows.iter().find(|r| r["key"] == "pm_timeout").unwrap();
        assert_eq!(timeout["default"], 300);
    }
}
