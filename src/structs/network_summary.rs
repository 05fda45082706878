use std::collections::BTreeMap;
use serde::Serialize;
use crate::enums::network_type::NetworkType;

/// Human-oriented summary attached to the network report.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub configuration_type: NetworkType,
    pub security_level: String,
    pub connectivity: ConnectivitySummary,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectivitySummary {
    pub inbound: InboundConnectivity,
    /// Outbound rule counts keyed by rule type
    pub outbound: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InboundConnectivity {
    pub public_access: bool,
    pub private_endpoints: usize,
    pub service_endpoints: usize,
}
