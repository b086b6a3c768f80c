//! Hardware extractor for lshw captures
//!
//! Flattens a capture tree into a [`HardwareProfile`]: system identity, BIOS,
//! CPU and memory totals, storage devices, network interfaces and categorized
//! PCI devices.
//!
//! Construction only fails when the `hardware` wrapper is missing. Once built,
//! [`HardwareInfo::parse`] always succeeds and every category degrades to its
//! default independently when its part of the tree is missing or malformed.

mod devices;
mod firmware;
mod node;
mod parsers;
mod tree;
mod types;

pub use firmware::{FirmwareDescriptor, FirmwareGrammar};
pub use node::NodeExt;
pub use parsers::hex_id;
pub use tree::{find_first, find_nodes_by_class, walk, PreOrder};
pub use types::{
    BiosInfo, BiosType, CpuInfo, HardwareProfile, LogicalName, MemoryInfo, NetworkInterface,
    PciCategory, PciDevice, PciInventory, StorageDevice, StorageType, SystemInfo,
};

use crate::error::{HwProfileError, Result};
use crate::patterns::PatternRegistry;
use devices::{round1, BYTES_PER_GIB};
use node::{count_value, positive_number};
use serde_json::Value;
use std::sync::Arc;

static EMPTY_TREE: Value = Value::Null;

/// Parser over one wrapped lshw capture
#[derive(Debug, Clone)]
pub struct HardwareInfo<'a> {
    node: String,
    data: &'a Value,
    input_name: String,
    registry: Arc<PatternRegistry>,
}

impl<'a> HardwareInfo<'a> {
    /// Wrap a capture using the built-in classification tables
    pub fn new(input_name: &str, raw: &'a Value) -> Result<Self> {
        Self::with_registry(input_name, raw, Arc::new(PatternRegistry::new()?))
    }

    /// Wrap a capture with a shared pattern registry
    pub fn with_registry(
        input_name: &str,
        raw: &'a Value,
        registry: Arc<PatternRegistry>,
    ) -> Result<Self> {
        let hardware = raw
            .get("hardware")
            .filter(|h| h.is_object())
            .ok_or_else(|| HwProfileError::missing_wrapper(input_name))?;

        let node = hardware
            .get("node")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            node,
            data: hardware.get("data").unwrap_or(&EMPTY_TREE),
            input_name: input_name.to_string(),
            registry,
        })
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Root of the capture tree
    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// Build the flat profile
    pub fn parse(&self) -> HardwareProfile {
        let pci = self.extract_pci_devices();

        let profile = HardwareProfile {
            node: self.node.clone(),
            system: self.extract_system_info(),
            bios: self.extract_bios_info(),
            cpu: self.extract_cpu_info(),
            memory: self.extract_memory_info(),
            storage_devices: self.extract_storage_devices(),
            network_interfaces: self.extract_network_interfaces(),
            pci_storage_controllers: pci.storage,
            pci_network_controllers: pci.network,
            pci_usb_controllers: pci.usb,
            pci_accelerators: pci.accelerator,
            pci_other_devices: pci.other,
        };

        tracing::debug!(
            "Extracted {}: {} sockets, {} GiB memory, {} disks, {} NICs",
            self.input_name,
            profile.cpu.cpu_sockets,
            profile.memory.memory_total_gb,
            profile.storage_devices.len(),
            profile.network_interfaces.len()
        );

        profile
    }

    /// Vendor, model and SKU from the root node
    pub fn extract_system_info(&self) -> SystemInfo {
        let (system_model, system_sku) = self
            .registry
            .parse_system_model(self.data.str_field("product"));

        SystemInfo {
            system_vendor: self.data.text_field("vendor"),
            system_model,
            system_sku,
            system_family: self
                .data
                .configuration()
                .and_then(|c| c.get("family"))
                .and_then(node::scalar_text),
        }
    }

    /// Details of the first firmware node found in pre-order
    pub fn extract_bios_info(&self) -> BiosInfo {
        let Some(firmware) = find_first(self.data, |n| {
            n.id() == Some("firmware") && n.has_class("memory")
        }) else {
            return BiosInfo::default();
        };

        let description = firmware.description().unwrap_or_default().to_uppercase();
        let uefi_capability = firmware
            .capabilities()
            .map(|caps| caps.contains_key("uefi"))
            .unwrap_or(false);

        let bios_type = if description.contains("UEFI") || uefi_capability {
            BiosType::Uefi
        } else if description.contains("EFI") {
            BiosType::Efi
        } else {
            BiosType::Bios
        };

        BiosInfo {
            bios_vendor: firmware.text_field("vendor"),
            bios_version: firmware.text_field("version"),
            bios_date: firmware.text_field("date"),
            bios_type: Some(bios_type),
        }
    }

    /// Identity of the first processor plus socket, core and thread totals
    pub fn extract_cpu_info(&self) -> CpuInfo {
        let cpus = find_nodes_by_class(self.data, "processor");
        let Some(first) = cpus.first() else {
            return CpuInfo::default();
        };

        let (cpu_vendor, _) = self.registry.parse_vendor(first.str_field("vendor"));
        let cpu_frequency_mhz = first.size().map(|hz| (hz / 1_000_000.0) as u64);

        let total = |key: &str| -> u64 {
            cpus.iter()
                .filter_map(|cpu| cpu.configuration()?.get(key))
                .filter_map(count_value)
                .fold(0u64, u64::saturating_add)
        };

        CpuInfo {
            cpu_vendor,
            cpu_model: first.text_field("product"),
            cpu_sockets: cpus.len(),
            cpu_total_cores: total("cores"),
            cpu_total_threads: total("threads"),
            cpu_frequency_mhz,
        }
    }

    /// Installed memory and populated DIMM slots
    ///
    /// Only `memory` / `memory:<n>` banks described as system memory count
    /// toward the total, which excludes firmware and cache nodes.
    pub fn extract_memory_info(&self) -> MemoryInfo {
        let mut total_bytes = 0.0;
        let mut dimm_count = 0;

        for bank in find_nodes_by_class(self.data, "memory") {
            let id = bank.id().unwrap_or_default();
            let is_bank = id == "memory" || id.starts_with("memory:");
            let is_system = id == "memory"
                || bank
                    .description()
                    .map(|d| d.contains("System Memory"))
                    .unwrap_or(false);

            if is_bank && is_system {
                total_bytes += bank.size().unwrap_or(0.0);
            }

            dimm_count += bank
                .children()
                .iter()
                .filter(|dimm| dimm.has_class("memory"))
                .filter(|dimm| dimm.get("size").and_then(positive_number).is_some())
                .count();
        }

        MemoryInfo {
            memory_total_gb: if total_bytes > 0.0 {
                round1(total_bytes / BYTES_PER_GIB)
            } else {
                0.0
            },
            memory_dimm_count: dimm_count,
        }
    }
}

/// Extract a profile, logging and returning `None` for an invalid capture
pub fn extract_profile(input_name: &str, capture: &Value) -> Option<HardwareProfile> {
    let registry = match PatternRegistry::new() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            tracing::error!("Error normalizing {}: {}", input_name, e);
            return None;
        }
    };
    extract_profile_with(input_name, capture, registry)
}

/// Same as [`extract_profile`] with a shared pattern registry
pub fn extract_profile_with(
    input_name: &str,
    capture: &Value,
    registry: Arc<PatternRegistry>,
) -> Option<HardwareProfile> {
    match HardwareInfo::with_registry(input_name, capture, registry) {
        Ok(info) => Some(info.parse()),
        Err(e) => {
            tracing::error!("Error normalizing {}: {}", input_name, e);
            None
        }
    }
}
