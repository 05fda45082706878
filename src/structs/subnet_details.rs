use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct SubnetDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address_prefix: Option<String>,
    pub resource_group: String,
    pub vnet_name: String,
    /// Raw NSG reference from the subnet descriptor (carries the id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_security_group: Option<Value>,
    /// Raw route table reference from the subnet descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_table: Option<Value>,
    pub service_endpoints: Vec<Value>,
    pub private_endpoint_network_policies: Option<String>,
    pub private_link_service_network_policies: Option<String>,
}
