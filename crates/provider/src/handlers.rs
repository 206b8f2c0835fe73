//! Resource and data source handler declarations.
//!
//! The create/read/update/delete logic of each resource lives outside this
//! crate. A handler here only declares the name it is registered under and a
//! short description, which is what the registry verifies.

use std::fmt;

/// A managed resource type.
pub trait ResourceHandler: fmt::Debug + Send + Sync {
    /// Registry name without the `proxmox_` prefix.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;
}

/// A read-only data source type.
pub trait DataSourceHandler: fmt::Debug + Send + Sync {
    /// Registry name without the `proxmox_` prefix.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;
}

macro_rules! declare_handler {
    ($handler:ident: $trait:ident, $name:literal, $description:literal) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $handler;

        impl $trait for $handler {
            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }
        }
    };
}

declare_handler!(VmQemu: ResourceHandler, "vm_qemu", "QEMU/KVM virtual machine");
declare_handler!(Lxc: ResourceHandler, "lxc", "LXC container");
declare_handler!(Pool: ResourceHandler, "pool", "Resource pool");
declare_handler!(
    CloudInitDisk: ResourceHandler,
    "cloud_init_disk",
    "Cloud-init ISO disk built from user, meta and network data"
);
declare_handler!(StorageIso: ResourceHandler, "storage_iso", "ISO image downloaded to a storage");
declare_handler!(HaGroups: DataSourceHandler, "ha_groups", "High-availability groups");

/// One handler per declared resource.
pub fn standard_resources() -> Vec<Box<dyn ResourceHandler>> {
    vec![
        Box::new(VmQemu),
        Box::new(Lxc),
        Box::new(Pool),
        Box::new(CloudInitDisk),
        Box::new(StorageIso),
    ]
}

/// One handler per declared data source.
pub fn standard_data_sources() -> Vec<Box<dyn DataSourceHandler>> {
    vec![Box::new(HaGroups)]
}
