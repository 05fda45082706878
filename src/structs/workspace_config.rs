use std::collections::BTreeSet;
use serde::Serialize;
use serde_json::Value;
use crate::enums::hub_type::HubType;
use crate::enums::isolation_mode::IsolationMode;

/// Configuration of an Azure ML workspace or AI Foundry hub as reported by
/// the workspace analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceConfig {
    pub name: String,
    pub resource_group: String,
    pub subscription_id: String,
    /// "managed" or "customer_managed"
    pub network_mode: String,
    /// Only meaningful for managed networks
    pub isolation_mode: Option<IsolationMode>,
    pub existing_outbound_rules: Vec<Value>,
    pub existing_domains: BTreeSet<String>,
    pub location: String,
    pub private_endpoint_enabled: bool,
    pub hub_type: HubType,
}
