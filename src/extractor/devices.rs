// Storage, network and PCI device extraction
use super::node::{config_text, scalar_text, NodeExt};
use super::parsers::hex_id;
use super::tree::{find_nodes_by_class, walk};
use super::types::{
    LogicalName, NetworkInterface, PciCategory, PciDevice, PciInventory, StorageDevice,
    StorageType,
};
use super::HardwareInfo;
use serde_json::{Map, Value};

pub(crate) const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Vendor and product identity shared by every device record
struct Identity {
    vendor: Option<String>,
    vendor_id: Option<String>,
    model: Option<String>,
    device_id: Option<String>,
}

impl<'a> HardwareInfo<'a> {
    /// All disks, then the disk and volume children of storage controllers
    ///
    /// A disk that sits under a storage controller is reported by both passes.
    /// Nodes without a size are not real devices and are dropped.
    pub fn extract_storage_devices(&self) -> Vec<StorageDevice> {
        let disks = find_nodes_by_class(self.data, "disk");
        let controllers = find_nodes_by_class(self.data, "storage");

        let attached = controllers.into_iter().flat_map(|storage| {
            storage
                .children()
                .iter()
                .filter(|child| child.has_class("volume") || child.has_class("disk"))
        });

        disks
            .into_iter()
            .chain(attached)
            .filter_map(|node| self.parse_storage_device(node))
            .collect()
    }

    fn parse_storage_device(&self, node: &Value) -> Option<StorageDevice> {
        let size = node.size()?;
        let identity = self.identity(node);

        let firmware = node
            .str_field("firmware")
            .map(str::to_string)
            .or_else(|| node.configuration().and_then(|c| c.get("firmware")).and_then(scalar_text));

        Some(StorageDevice {
            device_type: storage_type(node),
            description: node.text_field("description"),
            vendor: identity.vendor,
            vendor_id: identity.vendor_id,
            model: identity.model,
            device_id: identity.device_id,
            size_gb: round1(size / BYTES_PER_GIB),
            version: node.text_field("version"),
            firmware,
            businfo: node.text_field("businfo"),
        })
    }

    /// Every network-class node, with link state and parsed firmware
    pub fn extract_network_interfaces(&self) -> Vec<NetworkInterface> {
        find_nodes_by_class(self.data, "network")
            .into_iter()
            .map(|node| self.parse_network_interface(node))
            .collect()
    }

    fn parse_network_interface(&self, node: &Value) -> NetworkInterface {
        let identity = self.identity(node);
        let config = node.configuration();
        let (subvendor_id, subdevice_id) = subsystem_ids(config);

        // virtio NICs expose the interface name on a child network node
        let logical_name = logical_name(node).or_else(|| {
            node.children()
                .iter()
                .filter(|child| child.has_class("network"))
                .find_map(logical_name)
        });

        let firmware = config.and_then(|c| c.get("firmware")).and_then(scalar_text);
        let parsed = self
            .registry
            .parse_firmware(firmware.as_deref(), identity.vendor.as_deref());

        let businfo = node.text_field("businfo");
        let is_virtual_function = self.registry.is_virtual_function(businfo.as_deref());

        NetworkInterface {
            description: node.text_field("description"),
            vendor: identity.vendor,
            vendor_id: identity.vendor_id,
            model: identity.model,
            device_id: identity.device_id,
            subvendor_id,
            subdevice_id,
            logical_name,
            link_status: config.and_then(|c| c.get("link")).and_then(|v| toggle(v, "yes", "no")),
            duplex: config.and_then(|c| c.get("duplex")).and_then(scalar_text),
            autonegotiation: config
                .and_then(|c| c.get("autonegotiation"))
                .and_then(|v| toggle(v, "on", "off")),
            speed_mbps: self.link_speed(node, config),
            driver: config.and_then(|c| c.get("driver")).and_then(scalar_text),
            driver_version: config.and_then(|c| c.get("driverversion")).and_then(scalar_text),
            firmware,
            firmware_version: parsed.primary,
            is_virtual_function,
            businfo,
            firmware_bootcode: parsed.bootcode.filter(|s| !s.is_empty()),
            firmware_nvm: parsed.nvm.filter(|s| !s.is_empty()),
            firmware_psid: parsed.psid.filter(|s| !s.is_empty()),
            firmware_ncsi: parsed.ncsi.filter(|s| !s.is_empty()),
        }
    }

    /// Negotiated speed in Mbit/s, falling back to advertised capabilities
    fn link_speed(&self, node: &Value, config: Option<&Map<String, Value>>) -> Option<u64> {
        let negotiated = config_text(config, "speed").and_then(|speed| {
            let caps = self.registry.link_speed.captures(&speed)?;
            let value: u64 = caps[1].parse().ok()?;
            if &caps[2] == "Gbit" {
                value.checked_mul(1000)
            } else {
                Some(value)
            }
        });

        negotiated.filter(|mbps| *mbps > 0).or_else(|| {
            node.capabilities()?
                .keys()
                .map(|key| key.to_lowercase())
                .filter(|key| key.contains("gbit"))
                .find_map(|key| {
                    let caps = self.registry.capability_speed.captures(&key)?;
                    caps[1].parse::<u64>().ok()?.checked_mul(1000)
                })
        })
    }

    /// Walk the whole tree and bucket every PCI device
    pub fn extract_pci_devices(&self) -> PciInventory {
        let mut inventory = PciInventory::default();

        for node in walk(self.data) {
            let is_pci = node
                .get("businfo")
                .and_then(Value::as_str)
                .map(|b| b.starts_with("pci@"))
                .unwrap_or(false);
            if !is_pci {
                continue;
            }

            if let Some(category) = self.categorize_pci_device(node) {
                inventory.push(category, self.parse_pci_device(node));
            }
        }

        inventory
    }

    /// Category of a PCI node, or `None` when it is reported elsewhere
    pub fn categorize_pci_device(&self, node: &Value) -> Option<PciCategory> {
        let class = node.class().unwrap_or_default();
        let description = node.description().unwrap_or_default().to_lowercase();

        if self.registry.is_skipped_pci_class(class) {
            return None;
        }

        let category = if class == "network" {
            PciCategory::Network
        } else if self.registry.is_accelerator(&description) {
            PciCategory::Accelerator
        } else if class == "storage" {
            PciCategory::Storage
        } else if class == "bus" && description.contains("usb") {
            PciCategory::Usb
        } else {
            // bridge, bus, display, multimedia, generic and anything unrecognised
            PciCategory::Other
        };

        Some(category)
    }

    fn parse_pci_device(&self, node: &Value) -> PciDevice {
        let identity = self.identity(node);
        let (subvendor_id, subdevice_id) = subsystem_ids(node.configuration());
        let businfo = node.text_field("businfo");

        PciDevice {
            description: node.text_field("description"),
            vendor: identity.vendor,
            vendor_id: identity.vendor_id,
            model: identity.model,
            device_id: identity.device_id,
            subvendor_id,
            subdevice_id,
            is_virtual_function: self.registry.is_virtual_function(businfo.as_deref()),
            businfo,
            logical_name: logical_name(node),
        }
    }

    /// Parsed vendor and product, with the product vendor ID as fallback
    fn identity(&self, node: &Value) -> Identity {
        let (vendor, vendor_id) = self.registry.parse_vendor(node.str_field("vendor"));
        let (model, product_vendor_id, device_id) =
            self.registry.parse_product(node.str_field("product"));

        Identity {
            vendor,
            vendor_id: vendor_id.or(product_vendor_id),
            model,
            device_id,
        }
    }
}

/// Classify a storage device, first match wins
fn storage_type(node: &Value) -> StorageType {
    let businfo = node.businfo().unwrap_or_default().to_lowercase();
    let description = node.description().unwrap_or_default().to_lowercase();

    if businfo.contains("nvme") || description.contains("nvme") {
        StorageType::Nvme
    } else if businfo.contains("scsi") {
        StorageType::Scsi
    } else if businfo.contains("virtio") {
        StorageType::Virtio
    } else if businfo.contains("sata") || description.contains("ata") {
        StorageType::Sata
    } else {
        StorageType::Unknown
    }
}

/// Subsystem vendor and device IDs, falling back to the plain vendor and device keys
fn subsystem_ids(config: Option<&Map<String, Value>>) -> (Option<String>, Option<String>) {
    let Some(config) = config else {
        return (None, None);
    };

    let pick = |primary: &str, fallback: &str| {
        [primary, fallback]
            .iter()
            .filter_map(|key| config.get(*key))
            .find(|value| !is_blank(value))
            .and_then(hex_id)
    };

    (pick("subvendor", "vendor"), pick("subdevice", "device"))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// `logicalname` as a single name or a list, absent when empty
fn logical_name(node: &Value) -> Option<LogicalName> {
    match node.get("logicalname")? {
        Value::String(name) if !name.is_empty() => Some(LogicalName::Single(name.clone())),
        Value::Array(names) if !names.is_empty() => Some(LogicalName::Multiple(
            names.iter().filter_map(scalar_text).collect(),
        )),
        _ => None,
    }
}

/// Map a textual on/off flag to a boolean; already-normalized booleans pass through
fn toggle(value: &Value, on: &str, off: &str) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == on => Some(true),
        Value::String(s) if s == off => Some(false),
        _ => None,
    }
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
