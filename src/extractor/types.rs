// Flat hardware profile records produced by the extractor
use serde::{Deserialize, Serialize};

/// Flat, indexable hardware profile of one capture
///
/// Every group defaults independently, so a missing sub-tree in one category
/// leaves the others intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub node: String,
    #[serde(flatten)]
    pub system: SystemInfo,
    #[serde(flatten)]
    pub bios: BiosInfo,
    #[serde(flatten)]
    pub cpu: CpuInfo,
    #[serde(flatten)]
    pub memory: MemoryInfo,
    pub storage_devices: Vec<StorageDevice>,
    pub network_interfaces: Vec<NetworkInterface>,
    pub pci_storage_controllers: Vec<PciDevice>,
    pub pci_network_controllers: Vec<PciDevice>,
    pub pci_usb_controllers: Vec<PciDevice>,
    pub pci_accelerators: Vec<PciDevice>,
    pub pci_other_devices: Vec<PciDevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub system_vendor: Option<String>,
    pub system_model: Option<String>,
    pub system_sku: Option<String>,
    pub system_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiosInfo {
    pub bios_vendor: Option<String>,
    pub bios_version: Option<String>,
    pub bios_date: Option<String>,
    pub bios_type: Option<BiosType>,
}

/// Firmware interface flavour of the system BIOS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BiosType {
    Uefi,
    Efi,
    Bios,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub cpu_vendor: Option<String>,
    pub cpu_model: Option<String>,
    pub cpu_sockets: usize,
    pub cpu_total_cores: u64,
    pub cpu_total_threads: u64,
    pub cpu_frequency_mhz: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total system memory in GiB, one decimal
    pub memory_total_gb: f64,
    pub memory_dimm_count: usize,
}

/// Storage device family, derived from bus address and description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Nvme,
    Scsi,
    Virtio,
    Sata,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageDevice {
    #[serde(rename = "type")]
    pub device_type: StorageType,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub vendor_id: Option<String>,
    pub model: Option<String>,
    pub device_id: Option<String>,
    /// Capacity in GiB, one decimal
    pub size_gb: f64,
    pub version: Option<String>,
    pub firmware: Option<String>,
    pub businfo: Option<String>,
}

/// `logicalname` as found in the capture: one name or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogicalName {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub vendor_id: Option<String>,
    pub model: Option<String>,
    pub device_id: Option<String>,
    pub subvendor_id: Option<String>,
    pub subdevice_id: Option<String>,
    pub logical_name: Option<LogicalName>,
    pub link_status: Option<bool>,
    pub duplex: Option<String>,
    pub autonegotiation: Option<bool>,
    pub speed_mbps: Option<u64>,
    pub driver: Option<String>,
    pub driver_version: Option<String>,
    /// Raw firmware string as reported
    pub firmware: Option<String>,
    pub firmware_version: Option<String>,
    pub is_virtual_function: bool,
    pub businfo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_bootcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_nvm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_psid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_ncsi: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PciDevice {
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub vendor_id: Option<String>,
    pub model: Option<String>,
    pub device_id: Option<String>,
    pub subvendor_id: Option<String>,
    pub subdevice_id: Option<String>,
    pub is_virtual_function: bool,
    pub businfo: Option<String>,
    pub logical_name: Option<LogicalName>,
}

/// Bucket a PCI device is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PciCategory {
    Storage,
    Network,
    Usb,
    Accelerator,
    Other,
}

/// PCI devices grouped by category, each list in tree order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PciInventory {
    pub storage: Vec<PciDevice>,
    pub network: Vec<PciDevice>,
    pub usb: Vec<PciDevice>,
    pub accelerator: Vec<PciDevice>,
    pub other: Vec<PciDevice>,
}

impl PciInventory {
    pub fn push(&mut self, category: PciCategory, device: PciDevice) {
        let bucket = match category {
            PciCategory::Storage => &mut self.storage,
            PciCategory::Network => &mut self.network,
            PciCategory::Usb => &mut self.usb,
            PciCategory::Accelerator => &mut self.accelerator,
            PciCategory::Other => &mut self.other,
        };
        bucket.push(device);
    }

    pub fn len(&self) -> usize {
        self.storage.len()
            + self.network.len()
            + self.usb.len()
            + self.accelerator.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_profile_serializes_flat() {
        let profile = HardwareProfile {
            node: "worker-1".to_string(),
            bios: BiosInfo {
                bios_type: Some(BiosType::Uefi),
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["node"], json!("worker-1"));
        assert_eq!(value["bios_type"], json!("UEFI"));
        assert_eq!(value["cpu_sockets"], json!(0));
        assert_eq!(value["memory_total_gb"], json!(0.0));
        assert_eq!(value["system_vendor"], Value::Null);
        assert!(value.get("system").is_none());
        assert_eq!(value["pci_accelerators"], json!([]));
    }

    #[test]
    fn test_network_optional_firmware_fields_omitted() {
        let nic = NetworkInterface {
            firmware_psid: Some("DEL0000000015".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&nic).unwrap();
        assert_eq!(value["firmware_psid"], json!("DEL0000000015"));
        assert!(value.get("firmware_nvm").is_none());
        assert!(value.get("firmware_bootcode").is_none());
        assert_eq!(value["link_status"], Value::Null);
    }

    #[test]
    fn test_logical_name_shapes() {
        assert_eq!(
            serde_json::to_value(LogicalName::Single("eno1".to_string())).unwrap(),
            json!("eno1")
        );
        assert_eq!(
            serde_json::to_value(LogicalName::Multiple(vec!["/dev/sda".to_string()])).unwrap(),
            json!(["/dev/sda"])
        );
    }

    #[test]
    fn test_inventory_buckets() {
        let mut inventory = PciInventory::default();
        inventory.push(PciCategory::Accelerator, PciDevice::default());
        inventory.push(PciCategory::Other, PciDevice::default());
        assert_eq!(inventory.accelerator.len(), 1);
        assert_eq!(inventory.other.len(), 1);
        assert_eq!(inventory.len(), 2);
    }
}
