// Heuristic string parsers for lshw vendor, product, model and bus strings
//
// A string that does not match its grammar is passed through unchanged.
use crate::patterns::PatternRegistry;
use serde_json::Value;

impl PatternRegistry {
    /// Split `"Intel Corporation [8086]"` into name and uppercased vendor ID
    pub fn parse_vendor(&self, vendor: Option<&str>) -> (Option<String>, Option<String>) {
        let Some(vendor) = vendor.filter(|s| !s.is_empty()) else {
            return (None, None);
        };

        match self.vendor.captures(vendor) {
            Some(caps) => (
                Some(caps[1].trim().to_string()),
                Some(caps[2].to_uppercase()),
            ),
            None => (Some(vendor.to_string()), None),
        }
    }

    /// Split `"NetXtreme BCM5720 [14E4:165F]"` into model, vendor ID and device ID
    pub fn parse_product(
        &self,
        product: Option<&str>,
    ) -> (Option<String>, Option<String>, Option<String>) {
        let Some(product) = product.filter(|s| !s.is_empty()) else {
            return (None, None, None);
        };

        match self.product.captures(product) {
            Some(caps) => (
                Some(caps[1].trim().to_string()),
                Some(caps[2].to_uppercase()),
                Some(caps[3].to_uppercase()),
            ),
            None => (Some(product.to_string()), None, None),
        }
    }

    /// Split a system product string into model and SKU/part number
    ///
    /// - `"PowerEdge R750 (SKU=090E;ModelName=PowerEdge R750)"` -> `("PowerEdge R750", "090E")`
    /// - `"ProLiant DL110 Gen11 (P54277-B21)"` -> `("ProLiant DL110 Gen11", "P54277-B21")`
    /// - `"KVM (8.6.0)"` -> `("KVM", "8.6.0")`
    pub fn parse_system_model(&self, product: Option<&str>) -> (Option<String>, Option<String>) {
        let Some(product) = product.filter(|s| !s.is_empty()) else {
            return (None, None);
        };

        let Some(caps) = self.system_model.captures(product) else {
            return (Some(product.to_string()), None);
        };

        let base_model = caps[1].trim().to_string();
        let paren_content = caps[2].trim();

        if paren_content.contains("SKU=") {
            if let Some(sku) = self.sku.captures(paren_content) {
                let sku = sku[1].trim();
                if sku == "NotProvided" {
                    return (Some(base_model), None);
                }
                return (Some(base_model), Some(sku.to_string()));
            }
        }

        (Some(base_model), Some(paren_content.to_string()))
    }

    /// SR-IOV Virtual Functions sit on a non-zero PCI device number
    ///
    /// `pci@0000:9d:00.3` is a Physical Function (device `00`), while
    /// `pci@0000:9d:01.0` is a Virtual Function.
    pub fn is_virtual_function(&self, businfo: Option<&str>) -> bool {
        let Some(businfo) = businfo.filter(|b| b.starts_with("pci@")) else {
            return false;
        };

        self.pci_address
            .captures(businfo)
            .map(|caps| &caps[2] != "00")
            .unwrap_or(false)
    }
}

/// Render a subsystem ID (`"0x1028"` or `"1028"`) as uppercase hex without prefix
pub fn hex_id(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.replace("0x", ""),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let id = raw.trim().to_uppercase();
    (!id.is_empty()).then_some(id)
}
