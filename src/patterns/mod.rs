//! Pattern registry for configuration-driven normalization and extraction
//!
//! This module provides:
//! - Field classification tables for the type normalizer (boolean, numeric,
//!   capability names, negation markers)
//! - Device classification tables for the extractor (accelerator keywords,
//!   PCI classes handled elsewhere)
//! - Pre-compiled regex patterns for vendor, product, model, firmware and
//!   bus-address strings

use crate::error::{HwProfileError, Result};
use ahash::{HashSet, HashSetExt};
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_BOOLEAN_FIELDS: &[&str] = &[
    "claimed",
    "disabled",
    "boot",
    "broadcast",
    "link",
    "multicast",
    "slave",
    "removable",
    "audio",
    "dvd",
];

const DEFAULT_NUMERIC_FIELDS: &[&str] = &[
    "latency",
    "cores",
    "enabledcores",
    "microcode",
    "threads",
    "level",
    "ansiversion",
    "size",
    "capacity",
    "width",
    "clock",
    "units",
    "depth",
    "FATs",
    "logicalsectorsize",
    "sectorsize",
];

const DEFAULT_CAPABILITY_BOOLEAN_KEYS: &[&str] = &[
    "pci",
    "pciexpress",
    "pm",
    "msi",
    "msix",
    "bus_master",
    "cap_list",
    "rom",
    "fb",
    "pnp",
    "upgrade",
    "shadowing",
    "cdboot",
    "bootselect",
    "edd",
    "usb",
    "netboot",
    "acpi",
    "biosbootspecification",
    "uefi",
    "escd",
    "virtualmachine",
    "smp",
    "vsyscall32",
    "gpt-1_00",
    "partitioned",
    "partitioned:gpt",
    "nofs",
    "fat",
    "initialized",
    "journaled",
    "extended_attributes",
    "large_files",
    "huge_files",
    "dir_nlink",
    "recover",
    "extents",
    "ethernet",
    "physical",
    "removable",
    "audio",
    "dvd",
];

const DEFAULT_NEGATIVE_CAPABILITY_MARKERS: &[&str] = &[
    " no ",
    "not ",
    "none",
    "disabled",
    "unsupported",
    "unavailable",
];

const DEFAULT_ACCELERATOR_KEYWORDS: &[&str] = &[
    "accelerator",
    "processing accelerators",
    "fpga",
    "programmable logic",
    "3d controller",
    "gpu",
    "signal processing",
    "dsp",
];

const DEFAULT_SKIPPED_PCI_CLASSES: &[&str] = &["processor", "memory", "disk", "system"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Field classification tables used by the type normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerRules {
    /// Fields coerced to booleans wherever they appear
    pub boolean_fields: Vec<String>,
    /// Fields coerced to numbers wherever they appear
    pub numeric_fields: Vec<String>,
    /// Capability flags that are always treated as booleans
    pub capability_boolean_keys: Vec<String>,
    /// Substrings that mark descriptive capability text as "not present"
    pub negative_capability_markers: Vec<String>,
}

impl Default for NormalizerRules {
    fn default() -> Self {
        Self {
            boolean_fields: owned(DEFAULT_BOOLEAN_FIELDS),
            numeric_fields: owned(DEFAULT_NUMERIC_FIELDS),
            capability_boolean_keys: owned(DEFAULT_CAPABILITY_BOOLEAN_KEYS),
            negative_capability_markers: owned(DEFAULT_NEGATIVE_CAPABILITY_MARKERS),
        }
    }
}

/// Device classification tables used by the hardware extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorRules {
    /// Description keywords that classify a PCI device as an accelerator
    pub accelerator_keywords: Vec<String>,
    /// Node classes never reported as PCI devices
    pub skipped_pci_classes: Vec<String>,
}

impl Default for ExtractorRules {
    fn default() -> Self {
        Self {
            accelerator_keywords: owned(DEFAULT_ACCELERATOR_KEYWORDS),
            skipped_pci_classes: owned(DEFAULT_SKIPPED_PCI_CLASSES),
        }
    }
}

/// Compiled lookup tables for the normalizer
#[derive(Debug, Clone)]
pub struct FieldTables {
    boolean_fields: HashSet<String>,
    numeric_fields: HashSet<String>,
    capability_boolean_keys: HashSet<String>,
    negative_capability_markers: Vec<String>,
}

impl FieldTables {
    pub fn from_rules(rules: &NormalizerRules) -> Self {
        let set = |items: &[String]| {
            let mut set = HashSet::with_capacity(items.len());
            set.extend(items.iter().cloned());
            set
        };

        Self {
            boolean_fields: set(&rules.boolean_fields),
            numeric_fields: set(&rules.numeric_fields),
            capability_boolean_keys: set(&rules.capability_boolean_keys),
            negative_capability_markers: rules
                .negative_capability_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }

    pub fn is_boolean_field(&self, key: &str) -> bool {
        self.boolean_fields.contains(key)
    }

    pub fn is_numeric_field(&self, key: &str) -> bool {
        self.numeric_fields.contains(key)
    }

    pub fn is_boolean_capability(&self, key: &str) -> bool {
        self.capability_boolean_keys.contains(key)
    }

    /// `text` must already be lowercased
    pub fn has_negative_marker(&self, text: &str) -> bool {
        self.negative_capability_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
    }
}

impl Default for FieldTables {
    fn default() -> Self {
        Self::from_rules(&NormalizerRules::default())
    }
}

/// Pattern registry with all pre-compiled extraction patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    /// `"<name> [<hex-id>]"`
    pub vendor: Regex,
    /// `"<name> [<hex-vendor>:<hex-device>]"`
    pub product: Regex,
    /// `"<base> (<parenthetical>)"`
    pub system_model: Regex,
    /// `SKU=<value>` inside a system model parenthetical
    pub sku: Regex,
    /// `pci@<domain>:<bus>:<device>.<function>`
    pub pci_address: Regex,
    /// Negotiated link speed such as `25Gbit/s`
    pub link_speed: Regex,
    /// Capability keys such as `10gbit-fd` or `25gbit`
    pub capability_speed: Regex,
    /// Broadcom `NCSI v1.5.55.0` token
    pub ncsi: Regex,
    /// Mellanox `"<version> (<psid>)"`
    pub mellanox_firmware: Regex,
    /// Intel firmware token separator (whitespace or commas)
    pub intel_separator: Regex,
    /// Lowercased accelerator keywords
    pub accelerator_keywords: Vec<String>,
    /// Node classes excluded from PCI categorization
    pub skipped_pci_classes: HashSet<String>,
}

impl PatternRegistry {
    /// Build a registry with the built-in classification tables
    pub fn new() -> Result<Self> {
        Self::from_rules(&ExtractorRules::default())
    }

    /// Build a registry from configured classification tables
    pub fn from_rules(rules: &ExtractorRules) -> Result<Self> {
        let mut skipped_pci_classes = HashSet::with_capacity(rules.skipped_pci_classes.len());
        skipped_pci_classes.extend(rules.skipped_pci_classes.iter().cloned());

        Ok(Self {
            vendor: compile("vendor", r"^(.+?)\s*\[([0-9A-Fa-f]+)\]$")?,
            product: compile("product", r"^(.+?)\s*\[([0-9A-Fa-f]+):([0-9A-Fa-f]+)\]$")?,
            system_model: compile("system_model", r"^(.+?)\s*\(([^)]+)\)$")?,
            sku: compile("sku", r"SKU=([^;]+)")?,
            pci_address: compile(
                "pci_address",
                r"^pci@[0-9a-fA-F]+:([0-9a-fA-F]+):([0-9a-fA-F]+)\.([0-9a-fA-F]+)",
            )?,
            link_speed: compile("link_speed", r"(\d+)\s*(Gbit|Mbit)")?,
            capability_speed: compile("capability_speed", r"(\d+)gbit")?,
            ncsi: compile("ncsi", r"NCSI\s+(v[\d.]+)")?,
            mellanox_firmware: compile("mellanox_firmware", r"^([\d.]+)\s*\(([^)]+)\)")?,
            intel_separator: compile("intel_separator", r"[,\s]+")?,
            accelerator_keywords: rules
                .accelerator_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            skipped_pci_classes,
        })
    }

    /// `description` must already be lowercased
    pub fn is_accelerator(&self, description: &str) -> bool {
        self.accelerator_keywords
            .iter()
            .any(|keyword| description.contains(keyword.as_str()))
    }

    pub fn is_skipped_pci_class(&self, class: &str) -> bool {
        self.skipped_pci_classes.contains(class)
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        HwProfileError::Config(format!("Invalid regex for pattern '{}': {}", name, e))
    })
}
