use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NsgDetails {
    pub id: String,
    pub name: String,
    pub resource_group: String,
    pub location: Option<String>,
    pub security_rules: Vec<NsgRule>,
    pub default_security_rules: Vec<NsgRule>,
    pub rules_summary: NsgRulesSummary,
}

/// One NSG rule flattened for readability; source/destination render as
/// "prefix:port".
#[derive(Debug, Clone, Serialize)]
pub struct NsgRule {
    pub name: Option<String>,
    pub priority: i64,
    pub direction: Option<String>,
    pub access: Option<String>,
    pub protocol: Option<String>,
    pub source: String,
    pub destination: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct NsgRulesSummary {
    pub total_rules: usize,
    pub allow_rules: usize,
    pub deny_rules: usize,
    pub inbound_rules: usize,
    pub outbound_rules: usize,
    pub high_risk_rules: Vec<HighRiskRule>,
    pub open_ports: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighRiskRule {
    pub name: Option<String>,
    pub risk: String,
    pub port: Option<String>,
}
