//! Provider registry.
//!
//! Responsibilities:
//! - Hold the configuration schema and the resource and data source handlers.
//! - Verify that the registered handlers match the declared names exactly.
//! - Resolve provider configuration and build the shared client.
//!
//! Does NOT handle:
//! - Resource create/read/update/delete logic.
//! - Logging setup (see [`crate::logging`]).
//!
//! Invariants:
//! - Declared resources are exactly [`RESOURCE_NAMES`]; declared data sources
//!   are exactly [`DATA_SOURCE_NAMES`].
//! - A registry is plain data; every [`crate::provider`] call builds a new one.

use std::collections::BTreeMap;
use std::sync::Arc;

use pve_client::ClientHandle;
use pve_config::{Config, ConfigError, ConfigLoader, ConfigSchema};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ProviderError, RegistryError};
use crate::handlers::{
    DataSourceHandler, ResourceHandler, standard_data_sources, standard_resources,
};

/// Prefix of every host-facing resource and data source name.
pub const NAME_PREFIX: &str = "proxmox_";

/// Resource names the provider declares.
pub const RESOURCE_NAMES: [&str; 5] = ["vm_qemu", "lxc", "pool", "cloud_init_disk", "storage_iso"];

/// Data source names the provider declares.
pub const DATA_SOURCE_NAMES: [&str; 1] = ["ha_groups"];

/// Schema plus handlers.
#[derive(Debug)]
pub struct ProviderRegistry {
    schema: ConfigSchema,
    resources: BTreeMap<String, Box<dyn ResourceHandler>>,
    data_sources: BTreeMap<String, Box<dyn DataSourceHandler>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Registry with the provider schema and the standard handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty(ConfigSchema::new());
        for handler in standard_resources() {
            registry.register_resource(handler.name(), handler);
        }
        for handler in standard_data_sources() {
            registry.register_data_source(handler.name(), handler);
        }
        registry
    }

    /// Registry with the given schema and no handlers.
    pub fn empty(schema: ConfigSchema) -> Self {
        Self {
            schema,
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        }
    }

    /// Register a resource handler, replacing any handler under the same name.
    pub fn register_resource(&mut self, name: impl Into<String>, handler: Box<dyn ResourceHandler>) {
        self.resources.insert(name.into(), handler);
    }

    /// Register a data source handler, replacing any handler under the same name.
    pub fn register_data_source(
        &mut self,
        name: impl Into<String>,
        handler: Box<dyn DataSourceHandler>,
    ) {
        self.data_sources.insert(name.into(), handler);
    }

    /// Remove a resource handler.
    pub fn remove_resource(&mut self, name: &str) -> Option<Box<dyn ResourceHandler>> {
        self.resources.remove(name)
    }

    /// Remove a data source handler.
    pub fn remove_data_source(&mut self, name: &str) -> Option<Box<dyn DataSourceHandler>> {
        self.data_sources.remove(name)
    }

    pub fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    /// Registered resource names, sorted.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Registered data source names, sorted.
    pub fn data_source_names(&self) -> impl Iterator<Item = &str> {
        self.data_sources.keys().map(String::as_str)
    }

    /// Resource names as the host sees them, e.g. `proxmox_vm_qemu`.
    pub fn qualified_resource_names(&self) -> Vec<String> {
        self.resource_names().map(qualify).collect()
    }

    /// Data source names as the host sees them, e.g. `proxmox_ha_groups`.
    pub fn qualified_data_source_names(&self) -> Vec<String> {
        self.data_source_names().map(qualify).collect()
    }

    /// Look up a resource handler by unqualified or qualified name.
    pub fn resource(&self, name: &str) -> Option<&dyn ResourceHandler> {
        self.resources.get(unqualify(name)).map(Box::as_ref)
    }

    /// Look up a data source handler by unqualified or qualified name.
    pub fn data_source(&self, name: &str) -> Option<&dyn DataSourceHandler> {
        self.data_sources.get(unqualify(name)).map(Box::as_ref)
    }

    /// Check the registry against the declared names and the schema defaults.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found.
    pub fn verify(&self) -> Result<(), RegistryError> {
        for name in RESOURCE_NAMES {
            if !self.resources.contains_key(name) {
                return Err(RegistryError::MissingResource(name.to_string()));
            }
        }
        for (registered, handler) in &self.resources {
            if !RESOURCE_NAMES.contains(&registered.as_str()) {
                return Err(RegistryError::UnexpectedResource(registered.clone()));
            }
            check_name(registered, handler.name())?;
        }

        for name in DATA_SOURCE_NAMES {
            if !self.data_sources.contains_key(name) {
                return Err(RegistryError::MissingDataSource(name.to_string()));
            }
        }
        for (registered, handler) in &self.data_sources {
            if !DATA_SOURCE_NAMES.contains(&registered.as_str()) {
                return Err(RegistryError::UnexpectedDataSource(registered.clone()));
            }
            check_name(registered, handler.name())?;
        }

        for entry in self.schema.entries() {
            if let Some(default) = &entry.default
                && !entry.value_type.matches(default)
            {
                return Err(RegistryError::DefaultTypeMismatch {
                    key: entry.key.to_string(),
                    expected: entry.value_type,
                });
            }
        }

        debug!(
            "Registry verified: {} resources, {} data sources",
            self.resources.len(),
            self.data_sources.len()
        );
        Ok(())
    }

    /// Resolve provider configuration from host values and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unknown keys, mistyped values or a
    /// missing required key.
    pub fn resolve(&self, values: &Map<String, Value>) -> Result<Config, ConfigError> {
        ConfigLoader::for_schema(self.schema.clone())
            .from_values(values)?
            .from_env()?
            .build()
    }

    /// Resolve configuration and build the authenticated client shared by
    /// all resource operations.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] or [`ProviderError::Client`].
    pub async fn configure(
        &self,
        values: &Map<String, Value>,
    ) -> Result<Arc<ClientHandle>, ProviderError> {
        let config = self.resolve(values)?;
        let client = pve_client::build_client(&config.connection).await?;
        info!(
            "Provider configured for {} ({:?})",
            client.api_url(),
            client.credential_mode()
        );
        Ok(Arc::new(client))
    }
}

fn check_name(registered: &str, reported: &str) -> Result<(), RegistryError> {
    if registered == reported {
        Ok(())
    } else {
        Err(RegistryError::NameMismatch {
            registered: registered.to_string(),
            reported: reported.to_string(),
        })
    }
}

fn qualify(name: &str) -> String {
    format!("{NAME_PREFIX}{name}")
}

fn unqualify(name: &str) -> &str {
    name.strip_prefix(NAME_PREFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{HaGroups, Pool, VmQemu};
    use pve_config::constants::keys;
    use pve_config::{SchemaEntry, ValueType};

    #[test]
    fn test_standard_registry_verifies() {
        let registry = ProviderRegistry::new();
        assert_eq!(registry.verify(), Ok(()));
    }

    #[test]
    fn test_resource_and_data_source_sets() {
        let registry = ProviderRegistry::new();
        let mut expected: Vec<&str> = RESOURCE_NAMES.to_vec();
        expected.sort_unstable();
        assert_eq!(registry.resource_names().collect::<Vec<_>>(), expected);
        assert_eq!(
            registry.data_source_names().collect::<Vec<_>>(),
            vec!["ha_groups"]
        );
    }

    #[test]
    fn test_qualified_names() {
        let registry = ProviderRegistry::new();
        let names = registry.qualified_resource_names();
        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| n.starts_with("proxmox_")));
        assert!(names.contains(&"proxmox_vm_qemu".to_string()));
        assert_eq!(
            registry.qualified_data_source_names(),
            vec!["proxmox_ha_groups".to_string()]
        );
    }

    #[test]
    fn test_lookup_accepts_qualified_names() {
        let registry = ProviderRegistry::new();
        assert_eq!(registry.resource("proxmox_lxc").unwrap().name(), "lxc");
        assert_eq!(registry.resource("pool").unwrap().name(), "pool");
        assert!(registry.resource("proxmox_ha_groups").is_none());
        assert_eq!(registry.data_source("proxmox_ha_groups").unwrap().name(), "ha_groups");
    }

    #[test]
    fn test_missing_resource_detected() {
        let mut registry = ProviderRegistry::new();
        registry.remove_resource("storage_iso");
        assert_eq!(
            registry.verify(),
            Err(RegistryError::MissingResource("storage_iso".to_string()))
        );
    }

    #[test]
    fn test_extra_resource_detected() {
        let mut registry = ProviderRegistry::new();
        registry.register_resource("vm_qemu_legacy", Box::new(VmQemu));
        assert_eq!(
            registry.verify(),
            Err(RegistryError::UnexpectedResource("vm_qemu_legacy".to_string()))
        );
    }

    #[test]
    fn test_name_mismatch_detected() {
        let mut registry = ProviderRegistry::new();
        registry.register_resource("lxc", Box::new(Pool));
        assert_eq!(
            registry.verify(),
            Err(RegistryError::NameMismatch {
                registered: "lxc".to_string(),
                reported: "pool".to_string(),
            })
        );
    }

    #[test]
    fn test_data_source_checks() {
        let mut registry = ProviderRegistry::new();
        registry.remove_data_source("ha_groups");
        assert_eq!(
            registry.verify(),
            Err(RegistryError::MissingDataSource("ha_groups".to_string()))
        );

        registry.register_data_source("ha_groups", Box::new(HaGroups));
        registry.register_data_source("ha_group", Box::new(HaGroups));
        assert_eq!(
            registry.verify(),
            Err(RegistryError::UnexpectedDataSource("ha_group".to_string()))
        );
    }

    #[test]
    fn test_schema_default_type_mismatch_detected() {
        let schema = ConfigSchema::from_entries(vec![
            SchemaEntry::int("pm_timeout", "timeout").with_default("300"),
        ]);
        let mut registry = ProviderRegistry::empty(schema);
        for handler in standard_resources() {
            registry.register_resource(handler.name(), handler);
        }
        for handler in standard_data_sources() {
            registry.register_data_source(handler.name(), handler);
        }
        assert_eq!(
            registry.verify(),
            Err(RegistryError::DefaultTypeMismatch {
                key: "pm_timeout".to_string(),
                expected: ValueType::Int,
            })
        );
    }

    #[test]
    fn test_resolve_uses_registry_schema() {
        let schema = ConfigSchema::from_entries(vec![
            SchemaEntry::string(keys::API_URL, "endpoint").required(),
        ]);
        let registry = ProviderRegistry::empty(schema);

        let config = registry
            .resolve(&json_map(serde_json::json!({
                "pm_api_url": "https://pve.example.com:8006/api2/json"
            })))
            .unwrap();
        assert_eq!(
            config.connection.api_url,
            "https://pve.example.com:8006/api2/json"
        );

        let err = registry
            .resolve(&json_map(serde_json::json!({
                "pm_api_url": "https://pve.example.com:8006/api2/json",
                "pm_debug": true
            })))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(key) if key == "pm_debug"));
    }

    fn json_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProviderRegistry>();
    }
}
