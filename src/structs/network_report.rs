use serde::Serialize;
use serde_json::Value;
use crate::enums::isolation_mode::IsolationMode;
use crate::enums::network_type::NetworkType;
use crate::structs::network_summary::NetworkSummary;
use crate::structs::outbound_rule::OutboundRule;
use crate::structs::private_endpoint::PrivateEndpointInfo;
use crate::structs::vnet_report::VnetReport;

/// Formatted output of the network configuration analysis.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    pub network_type: NetworkType,
    pub isolation_mode: Option<IsolationMode>,
    pub public_network_access: bool,
    pub private_endpoints: PrivateEndpointSection,
    pub outbound_rules: OutboundRuleSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_network: Option<Value>,
    pub subnets: Vec<Value>,
    pub summary: NetworkSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnet_details: Option<VnetReport>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct PrivateEndpointSection {
    pub count: usize,
    pub endpoints: Vec<PrivateEndpointInfo>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct OutboundRuleSection {
    pub count: usize,
    pub rules: CategorizedRules,
}

/// Outbound rules grouped by type, with required-category rules pulled out
/// into their own bucket.
#[derive(Debug, Clone, Serialize, Default)]
pub struct CategorizedRules {
    pub fqdn: Vec<OutboundRule>,
    pub service_tag: Vec<OutboundRule>,
    pub private_endpoint: Vec<OutboundRule>,
    pub required: Vec<OutboundRule>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub other: Vec<OutboundRule>,
}

impl CategorizedRules {
    pub fn iter_all(&self) -> impl Iterator<Item = &OutboundRule> {
        self.fqdn.iter()
            .chain(self.service_tag.iter())
            .chain(self.private_endpoint.iter())
            .chain(self.required.iter())
            .chain(self.other.iter())
    }
}
