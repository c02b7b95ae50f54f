//! The individual extraction rules.
//!
//! Each rule is one regex search over the raw spec text. Rules are
//! independent; a rule that finds nothing returns `None` and is not an
//! error. The first (leftmost) occurrence wins when a pattern appears
//! more than once.

use regex::Regex;
use std::sync::LazyLock;

static SOCKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(LGA\s*\d{4})(.*?Socket\s*\w+)?").unwrap());

// Wattage-first form ("350W ... TDP") is preferred over the label-first
// form ("TDP ... 350W").
static TDP_BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{2,4})\s*W.*?TDP").unwrap());

static TDP_AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TDP.*?(\d{2,4})\s*W").unwrap());

static CPU_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(single|dual|quad|2|4)[-\s]*(processor|cpu)").unwrap());

static MEMORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(ddr[345][^\n]*)").unwrap());

static DIMM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*dimm").unwrap());

static PSU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d{3,4})\s*W").unwrap());

static RACK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([1-8][Uu])\b").unwrap());

static BAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*2\.5.*?(nvme|sata)").unwrap());

static M2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*M\.?2\b").unwrap());

/// CPU socket, e.g. "LGA 4677 Socket E". The trailing `Socket <name>` part
/// is appended only when it appears after the LGA number on the same line.
pub(crate) fn cpu_socket(text: &str) -> Option<String> {
    let caps = SOCKET_RE.captures(text)?;
    let mut socket = caps[1].to_string();
    if let Some(rest) = caps.get(2) {
        socket.push(' ');
        socket.push_str(rest.as_str().trim());
    }
    Some(socket.trim().to_string())
}

/// Per-CPU thermal design power in watts.
pub(crate) fn max_tdp_watts(text: &str) -> Option<u32> {
    let caps = TDP_BEFORE_RE
        .captures(text)
        .or_else(|| TDP_AFTER_RE.captures(text))?;
    caps[1].parse().ok()
}

/// Number of CPU sockets populated; 1 unless the text says otherwise.
pub(crate) fn cpu_count(text: &str) -> u32 {
    match CPU_COUNT_RE.captures(text) {
        Some(caps) => match caps[1].to_lowercase().as_str() {
            "dual" | "2" => 2,
            "quad" | "4" => 4,
            _ => 1,
        },
        None => 1,
    }
}

/// Memory generation plus the rest of its line, e.g. "DDR5 RDIMM up to 4800 MT/s".
pub(crate) fn memory_type(text: &str) -> Option<String> {
    MEMORY_RE.captures(text).map(|caps| caps[1].trim().to_string())
}

pub(crate) fn dimm_slots(text: &str) -> Option<u32> {
    DIMM_RE.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// PSU configuration rendered as "<count> x <watts>W".
pub(crate) fn psu_config(text: &str) -> Option<String> {
    let caps = PSU_RE.captures(text)?;
    let count: u32 = caps[1].parse().ok()?;
    Some(format!("{count} x {}W", &caps[2]))
}

/// Rack height, normalized to uppercase ("2U").
pub(crate) fn rack_unit(text: &str) -> Option<String> {
    RACK_RE.captures(text).map(|caps| caps[1].to_uppercase())
}

/// Count of 2.5" drive bays, qualified by an NVMe or SATA mention.
pub(crate) fn drive_bays_25in(text: &str) -> Option<u32> {
    BAY_RE.captures(text).and_then(|caps| caps[1].parse().ok())
}

pub(crate) fn m2_slots(text: &str) -> Option<u32> {
    M2_RE.captures(text).and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_with_name() {
        assert_eq!(
            cpu_socket("CPU: LGA 4677 Socket E (4th Gen Xeon)").as_deref(),
            Some("LGA 4677 Socket E")
        );
    }

    #[test]
    fn test_socket_number_only() {
        assert_eq!(cpu_socket("Supports LGA4189 processors").as_deref(), Some("LGA4189"));
    }

    #[test]
    fn test_socket_name_on_other_line_ignored() {
        // The lazy group does not cross a line break.
        assert_eq!(
            cpu_socket("LGA 4677\nSocket E is mentioned elsewhere").as_deref(),
            Some("LGA 4677")
        );
    }

    #[test]
    fn test_tdp_wattage_first() {
        assert_eq!(max_tdp_watts("Supports up to 350W TDP processors"), Some(350));
    }

    #[test]
    fn test_tdp_label_first() {
        assert_eq!(max_tdp_watts("TDP: up to 270 W"), Some(270));
    }

    #[test]
    fn test_tdp_absent() {
        assert_eq!(max_tdp_watts("No power figures here"), None);
    }

    #[test]
    fn test_cpu_count_words() {
        assert_eq!(cpu_count("Dual processor server"), 2);
        assert_eq!(cpu_count("quad-CPU configuration"), 4);
        assert_eq!(cpu_count("Single processor"), 1);
    }

    #[test]
    fn test_cpu_count_digits() {
        assert_eq!(cpu_count("2 processor system"), 2);
        assert_eq!(cpu_count("4-cpu node"), 4);
    }

    #[test]
    fn test_cpu_count_default() {
        assert_eq!(cpu_count("nothing about processors here"), 1);
    }

    #[test]
    fn test_memory_type_takes_rest_of_line() {
        assert_eq!(
            memory_type("Memory: DDR5 RDIMM up to 4800 MT/s\n32 x DIMM").as_deref(),
            Some("DDR5 RDIMM up to 4800 MT/s")
        );
    }

    #[test]
    fn test_dimm_slots() {
        assert_eq!(dimm_slots("32 x DIMM slots"), Some(32));
        assert_eq!(dimm_slots("8x DIMM"), Some(8));
    }

    #[test]
    fn test_psu_config() {
        assert_eq!(
            psu_config("2 x 1300W 80 PLUS Titanium redundant").as_deref(),
            Some("2 x 1300W")
        );
    }

    #[test]
    fn test_psu_requires_wattage_digits() {
        // A drive bay count must not read as a PSU.
        assert_eq!(psu_config("8 x 2.5\" NVMe bays"), None);
    }

    #[test]
    fn test_rack_unit_uppercased() {
        assert_eq!(rack_unit("2u rackmount chassis").as_deref(), Some("2U"));
    }

    #[test]
    fn test_rack_unit_not_inside_word() {
        assert_eq!(rack_unit("X13U5 model code"), None);
    }

    #[test]
    fn test_drive_bays() {
        assert_eq!(drive_bays_25in("12 x 2.5\" hot-swap SATA/SAS bays"), Some(12));
        assert_eq!(drive_bays_25in("8 x 2.5 Gen4 NVMe"), Some(8));
    }

    #[test]
    fn test_drive_bays_need_interface() {
        assert_eq!(drive_bays_25in("4 x 2.5\" bays"), None);
    }

    #[test]
    fn test_m2_slots() {
        assert_eq!(m2_slots("2 x M.2 slots (PCIe Gen4 x4)"), Some(2));
        assert_eq!(m2_slots("1 x M2 22110"), Some(1));
    }
}
