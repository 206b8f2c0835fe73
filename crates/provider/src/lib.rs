//! Proxmox VE provider core.
//!
//! This crate ties the configuration schema, the client factory and the
//! resource and data source handlers together in a [`ProviderRegistry`].
//! Call [`provider`] to obtain a verified registry, then
//! [`ProviderRegistry::configure`] with the host-supplied configuration to get
//! the shared authenticated client.

pub mod error;
pub mod handlers;
pub mod logging;
pub mod registry;

pub use error::{ProviderError, RegistryError};
pub use handlers::{DataSourceHandler, ResourceHandler};
pub use registry::{DATA_SOURCE_NAMES, NAME_PREFIX, ProviderRegistry, RESOURCE_NAMES};

/// Build a new, verified provider registry.
///
/// # Errors
///
/// Returns a [`RegistryError`] if the registered handlers or schema defaults
/// do not match the declarations.
pub fn provider() -> Result<ProviderRegistry, RegistryError> {
    let registry = ProviderRegistry::new();
    registry.verify()?;
    Ok(registry)
}
