//! Vendor-specific firmware version grammars
//!
//! NIC firmware strings pack several versions into one field and every vendor
//! uses its own layout:
//! - Broadcom: `"FFV21.80.8 bc 5720-v1.39"`, `"5719-v1.55 NCSI v1.5.55.0"`
//! - Intel: `"4.20 0x8001778b 22.0.9"`, `"1.63, 0x80001099, 1.3310.0"`
//! - Mellanox: `"14.32.2004 (DEL0000000015)"`
//!
//! The grammar is chosen from the vendor name through an ordered table, so the
//! first matching entry wins.

use crate::patterns::PatternRegistry;
use serde::{Deserialize, Serialize};

/// Structured view of a composite firmware string
///
/// Only the fields a vendor grammar yields are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareDescriptor {
    pub primary: Option<String>,
    pub extended: Option<String>,
    pub bootcode: Option<String>,
    pub nvm: Option<String>,
    pub psid: Option<String>,
    pub ncsi: Option<String>,
}

/// Firmware string layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareGrammar {
    Broadcom,
    Intel,
    Mellanox,
    /// Red Hat / virtio: the whole string is the version
    Passthrough,
    /// First token is the version, the rest is extended info
    Generic,
}

/// Vendor substrings (lowercase) mapped to grammars, in priority order
const VENDOR_GRAMMARS: &[(&[&str], FirmwareGrammar)] = &[
    (&["broadcom"], FirmwareGrammar::Broadcom),
    (&["intel"], FirmwareGrammar::Intel),
    (&["mellanox"], FirmwareGrammar::Mellanox),
    (&["red hat", "virtio"], FirmwareGrammar::Passthrough),
];

impl FirmwareGrammar {
    /// Select the grammar for a vendor name
    pub fn for_vendor(vendor: Option<&str>) -> Self {
        let vendor = vendor.unwrap_or_default().to_lowercase();
        VENDOR_GRAMMARS
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| vendor.contains(n)))
            .map(|(_, grammar)| *grammar)
            .unwrap_or(FirmwareGrammar::Generic)
    }

    /// Decompose a non-empty firmware string
    pub fn parse(self, registry: &PatternRegistry, firmware: &str) -> FirmwareDescriptor {
        match self {
            Self::Broadcom => parse_broadcom(registry, firmware),
            Self::Intel => parse_intel(registry, firmware),
            Self::Mellanox => parse_mellanox(registry, firmware),
            Self::Passthrough => FirmwareDescriptor {
                primary: Some(firmware.to_string()),
                ..Default::default()
            },
            Self::Generic => parse_generic(firmware),
        }
    }
}

impl PatternRegistry {
    /// Parse a firmware string using the grammar of `vendor`
    pub fn parse_firmware(&self, firmware: Option<&str>, vendor: Option<&str>) -> FirmwareDescriptor {
        match firmware.filter(|f| !f.is_empty()) {
            Some(firmware) => FirmwareGrammar::for_vendor(vendor).parse(self, firmware),
            None => FirmwareDescriptor::default(),
        }
    }
}

fn first_or_whole(parts: &[&str], firmware: &str) -> Option<String> {
    Some(parts.first().copied().unwrap_or(firmware).to_string())
}

fn join_rest(parts: &[&str]) -> Option<String> {
    (parts.len() > 1).then(|| parts[1..].join(" "))
}

fn parse_broadcom(registry: &PatternRegistry, firmware: &str) -> FirmwareDescriptor {
    let parts: Vec<&str> = firmware.split_whitespace().collect();

    let bootcode = parts
        .iter()
        .position(|p| *p == "bc")
        .and_then(|idx| parts.get(idx + 1))
        .map(|p| p.to_string());

    let ncsi = if firmware.contains("NCSI") {
        registry
            .ncsi
            .captures(firmware)
            .map(|caps| caps[1].to_string())
    } else {
        None
    };

    FirmwareDescriptor {
        primary: first_or_whole(&parts, firmware),
        extended: join_rest(&parts),
        bootcode,
        ncsi,
        ..Default::default()
    }
}

fn parse_intel(registry: &PatternRegistry, firmware: &str) -> FirmwareDescriptor {
    let parts: Vec<&str> = registry
        .intel_separator
        .split(firmware.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut descriptor = FirmwareDescriptor {
        primary: first_or_whole(&parts, firmware),
        ..Default::default()
    };

    if parts.len() >= 3 {
        let nvm = parts[parts.len() - 1];
        descriptor.extended = Some(format!("NVM {}", nvm));
        descriptor.nvm = Some(nvm.to_string());
    } else {
        descriptor.extended = join_rest(&parts);
    }

    descriptor
}

fn parse_mellanox(registry: &PatternRegistry, firmware: &str) -> FirmwareDescriptor {
    match registry.mellanox_firmware.captures(firmware) {
        Some(caps) => FirmwareDescriptor {
            primary: Some(caps[1].to_string()),
            extended: Some(format!("PSID: {}", &caps[2])),
            psid: Some(caps[2].to_string()),
            ..Default::default()
        },
        None => FirmwareDescriptor {
            primary: Some(firmware.to_string()),
            ..Default::default()
        },
    }
}

fn parse_generic(firmware: &str) -> FirmwareDescriptor {
    let parts: Vec<&str> = firmware.split_whitespace().collect();
    FirmwareDescriptor {
        primary: first_or_whole(&parts, firmware),
        extended: join_rest(&parts),
        ..Default::default()
    }
}
