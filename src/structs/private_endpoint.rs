use serde::Serialize;
use serde_json::Value;

/// A private endpoint attached to the workspace. Endpoints come from two
/// sources with different shapes: connections embedded in the workspace
/// descriptor (id + states only) and endpoints listed in the resource group
/// (full detail); absent fields stay `None`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct PrivateEndpointInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub network_interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<Value>,
}
