//! Spec-text attribute extraction.
//!
//! This is the domain core: a fixed battery of regex heuristics that turn
//! the visible text of a product spec sheet into a flat [`SpecSheet`]
//! record. Every attribute is optional; extraction is pure and never fails
//! on arbitrary input.

use serde::{Deserialize, Serialize};

mod rules;

/// Hardware attributes pulled from a spec sheet's visible text.
///
/// `total_tdp_watts` is the one computed value: per-CPU TDP times the
/// detected CPU count. It is present exactly when `max_tdp_watts` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSheet {
    pub cpu_socket: Option<String>,
    pub max_tdp_watts: Option<u32>,
    pub cpu_count: u32,
    pub total_tdp_watts: Option<u32>,
    pub memory_type: Option<String>,
    pub dimm_slots: Option<u32>,
    pub psu_config: Option<String>,
    pub rack_unit: Option<String>,
    pub drive_bays_25in: Option<u32>,
    pub m2_slots: Option<u32>,
}

impl Default for SpecSheet {
    fn default() -> Self {
        Self {
            cpu_socket: None,
            max_tdp_watts: None,
            cpu_count: 1,
            total_tdp_watts: None,
            memory_type: None,
            dimm_slots: None,
            psu_config: None,
            rack_unit: None,
            drive_bays_25in: None,
            m2_slots: None,
        }
    }
}

/// Run every extraction rule over the given text.
pub fn parse_spec_text(text: &str) -> SpecSheet {
    let max_tdp_watts = rules::max_tdp_watts(text);
    let cpu_count = rules::cpu_count(text);

    SpecSheet {
        cpu_socket: rules::cpu_socket(text),
        max_tdp_watts,
        cpu_count,
        total_tdp_watts: max_tdp_watts.map(|w| w * cpu_count),
        memory_type: rules::memory_type(text),
        dimm_slots: rules::dimm_slots(text),
        psu_config: rules::psu_config(text),
        rack_unit: rules::rack_unit(text),
        drive_bays_25in: rules::drive_bays_25in(text),
        m2_slots: rules::m2_slots(text),
    }
}

impl SpecSheet {
    /// Display labels, in presentation order.
    pub const LABELS: [&'static str; 10] = [
        "CPU Socket",
        "Max TDP",
        "CPU Count",
        "Total TDP",
        "Memory Type",
        "DIMM Slots",
        "Power Supply",
        "Rack Unit",
        "2.5\" Drive Bays",
        "M.2 Slots",
    ];

    /// Attribute values in [`Self::LABELS`] order. Absent attributes render
    /// as empty strings; wattages carry a `W` suffix.
    pub fn values(&self) -> [String; 10] {
        [
            self.cpu_socket.clone().unwrap_or_default(),
            self.max_tdp_watts.map(|w| format!("{w}W")).unwrap_or_default(),
            self.cpu_count.to_string(),
            self.total_tdp_watts.map(|w| format!("{w}W")).unwrap_or_default(),
            self.memory_type.clone().unwrap_or_default(),
            self.dimm_slots.map(|n| n.to_string()).unwrap_or_default(),
            self.psu_config.clone().unwrap_or_default(),
            self.rack_unit.clone().unwrap_or_default(),
            self.drive_bays_25in.map(|n| n.to_string()).unwrap_or_default(),
            self.m2_slots.map(|n| n.to_string()).unwrap_or_default(),
        ]
    }

    /// Populated (label, value) pairs for display. `CPU Count` is always
    /// among them since the parser defaults it to 1.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        Self::LABELS
            .into_iter()
            .zip(self.values())
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// True when no extraction rule matched. The defaulted `cpu_count`
    /// does not count as a match.
    pub fn is_empty(&self) -> bool {
        self.cpu_socket.is_none()
            && self.max_tdp_watts.is_none()
            && self.memory_type.is_none()
            && self.dimm_slots.is_none()
            && self.psu_config.is_none()
            && self.rack_unit.is_none()
            && self.drive_bays_25in.is_none()
            && self.m2_slots.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RACK_SERVER: &str = "\
1U rack server\n\
Dual processor, 4th Gen Intel Xeon Scalable\n\
LGA 4677 Socket E\n\
Up to 350W TDP per CPU\n\
32 x DIMM slots\n\
DDR5 RDIMM up to 4800 MT/s\n\
8 x 2.5\" Gen4 NVMe hot-swap bays\n\
2 x M.2 slots (PCIe Gen4 x4)\n\
2 x 1300W 80 PLUS Titanium redundant\n";

    #[test]
    fn test_full_sheet() {
        let sheet = parse_spec_text(RACK_SERVER);

        assert_eq!(sheet.cpu_socket.as_deref(), Some("LGA 4677 Socket E"));
        assert_eq!(sheet.max_tdp_watts, Some(350));
        assert_eq!(sheet.cpu_count, 2);
        assert_eq!(sheet.total_tdp_watts, Some(700));
        assert_eq!(sheet.memory_type.as_deref(), Some("DDR5 RDIMM up to 4800 MT/s"));
        assert_eq!(sheet.dimm_slots, Some(32));
        assert_eq!(sheet.psu_config.as_deref(), Some("2 x 1300W"));
        assert_eq!(sheet.rack_unit.as_deref(), Some("1U"));
        assert_eq!(sheet.drive_bays_25in, Some(8));
        assert_eq!(sheet.m2_slots, Some(2));
        assert!(!sheet.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let sheet = parse_spec_text("");
        assert!(sheet.is_empty());
        assert_eq!(sheet.cpu_count, 1);
        assert_eq!(sheet.total_tdp_watts, None);
    }

    #[test]
    fn test_total_tdp_requires_max_tdp() {
        let sheet = parse_spec_text("Dual processor barebone, no power figures");
        assert_eq!(sheet.cpu_count, 2);
        assert_eq!(sheet.max_tdp_watts, None);
        assert_eq!(sheet.total_tdp_watts, None);
    }

    #[test]
    fn test_single_socket_total_equals_max() {
        let sheet = parse_spec_text("Single processor tower, 270W TDP support");
        assert_eq!(sheet.cpu_count, 1);
        assert_eq!(sheet.max_tdp_watts, Some(270));
        assert_eq!(sheet.total_tdp_watts, Some(270));
    }

    #[test]
    fn test_fields_skip_absent_attributes() {
        let sheet = parse_spec_text("2U chassis");
        let fields = sheet.fields();
        assert_eq!(
            fields,
            vec![("CPU Count", "1".to_string()), ("Rack Unit", "2U".to_string())]
        );
    }

    #[test]
    fn test_values_align_with_labels() {
        let sheet = parse_spec_text(RACK_SERVER);
        let values = sheet.values();
        assert_eq!(values.len(), SpecSheet::LABELS.len());
        assert_eq!(values[1], "350W");
        assert_eq!(values[3], "700W");
    }
}
