use serde::Serialize;

/// A managed-network outbound rule normalized to a flat shape. The
/// destination rendering depends on the rule type: FQDN rules keep the raw
/// string, service-tag rules render "{tag} (Ports: {ranges})", and
/// private-endpoint rules keep the target resource's trailing id segment.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundRule {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub destination: String,
    pub category: String,
    pub status: String,
}
