use std::collections::{BTreeSet, HashMap};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Well-known ports and their exposure risk.
static COMMON_PORTS: Lazy<HashMap<u32, (&'static str, &'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        (20, ("FTP Data", "TCP", "Medium")),
        (21, ("FTP Control", "TCP", "Medium")),
        (22, ("SSH", "TCP", "Medium")),
        (23, ("Telnet", "TCP", "High")),
        (25, ("SMTP", "TCP", "Medium")),
        (53, ("DNS", "TCP/UDP", "Low")),
        (80, ("HTTP", "TCP", "Medium")),
        (110, ("POP3", "TCP", "Medium")),
        (143, ("IMAP", "TCP", "Medium")),
        (443, ("HTTPS", "TCP", "Low")),
        (445, ("SMB", "TCP", "High")),
        (993, ("IMAPS", "TCP", "Low")),
        (995, ("POP3S", "TCP", "Low")),
        (1433, ("SQL Server", "TCP", "High")),
        (1521, ("Oracle DB", "TCP", "High")),
        (3306, ("MySQL", "TCP", "High")),
        (3389, ("RDP", "TCP", "High")),
        (5432, ("PostgreSQL", "TCP", "High")),
        (5831, ("Azure ML", "TCP", "Low")),
        (5985, ("WinRM HTTP", "TCP", "Medium")),
        (5986, ("WinRM HTTPS", "TCP", "Medium")),
        (8080, ("HTTP Alt", "TCP", "Medium")),
        (8443, ("HTTPS Alt", "TCP", "Medium")),
        (8787, ("RStudio", "TCP", "Medium")),
        (18881, ("Azure ML Python IntelliSense", "TCP", "Low")),
    ])
});

#[derive(Debug, Clone, Serialize)]
pub struct PortInfo {
    pub port: u32,
    pub name: String,
    pub protocol: String,
    pub risk: String,
}

pub fn identify_common_port(port: u32) -> PortInfo {
    match COMMON_PORTS.get(&port) {
        Some((name, protocol, risk)) => PortInfo {
            port,
            name: name.to_string(),
            protocol: protocol.to_string(),
            risk: risk.to_string(),
        },
        None => PortInfo {
            port,
            name: format!("Port {}", port),
            protocol: "Unknown".to_string(),
            risk: "Unknown".to_string(),
        },
    }
}

/// Parse a port range string ("443", "8000-8010", "22,80,443", "*") into a
/// sorted, deduplicated port list.
pub fn parse_port_range(port_range: &str) -> Vec<u32> {
    if port_range == "*" || port_range.eq_ignore_ascii_case("any") {
        return (1..=65535).collect();
    }

    let mut ports = BTreeSet::new();

    for piece in port_range.split(',') {
        let piece = piece.trim();
        if let Some((start, end)) = piece.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
                ports.extend(start..=end);
            }
        } else if let Ok(port) = piece.parse::<u32>() {
            ports.insert(port);
        }
    }

    ports.into_iter().collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PortExposure {
    pub total_ports: usize,
    pub high_risk_ports: Vec<u32>,
    pub medium_risk_ports: Vec<u32>,
    pub risk_assessment: String,
}

/// Expand the given ranges and grade the exposed surface.
pub fn analyze_port_exposure(port_ranges: &[String]) -> PortExposure {
    let mut all_ports = BTreeSet::new();
    let mut high_risk = BTreeSet::new();
    let mut medium_risk = BTreeSet::new();

    for range in port_ranges {
        for port in parse_port_range(range) {
            all_ports.insert(port);
            match identify_common_port(port).risk.as_str() {
                "High" => {
                    high_risk.insert(port);
                }
                "Medium" => {
                    medium_risk.insert(port);
                }
                _ => {}
            }
        }
    }

    let risk_assessment = if !high_risk.is_empty() {
        format!("High - {} high-risk port(s) exposed", high_risk.len())
    } else if !medium_risk.is_empty() {
        format!("Medium - {} medium-risk port(s) exposed", medium_risk.len())
    } else {
        "Low - No high-risk ports exposed".to_string()
    };

    PortExposure {
        total_ports: all_ports.len(),
        high_risk_ports: high_risk.into_iter().collect(),
        medium_risk_ports: medium_risk.into_iter().collect(),
        risk_assessment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_port() {
        assert_eq!(parse_port_range("443"), vec![443]);
    }

    #[test]
    fn parses_range_and_comma_lists() {
        assert_eq!(parse_port_range("8000-8002"), vec![8000, 8001, 8002]);
        assert_eq!(parse_port_range("22, 443, 80-81"), vec![22, 80, 81, 443]);
    }

    #[test]
    fn wildcard_expands_to_all_ports() {
        let ports = parse_port_range("*");
        assert_eq!(ports.len(), 65535);
        assert_eq!(ports[0], 1);
    }

    #[test]
    fn garbage_pieces_are_skipped() {
        assert_eq!(parse_port_range("22,abc,80"), vec![22, 80]);
    }

    #[test]
    fn exposure_grades_by_worst_port() {
        let exposure = analyze_port_exposure(&["3389".to_string(), "443".to_string()]);
        assert_eq!(exposure.total_ports, 2);
        assert_eq!(exposure.high_risk_ports, vec![3389]);
        assert!(exposure.risk_assessment.starts_with("High"));

        let exposure = analyze_port_exposure(&["443".to_string()]);
        assert!(exposure.risk_assessment.starts_with("Low"));
    }
}
