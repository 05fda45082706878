use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RouteTableDetails {
    pub id: String,
    pub name: String,
    pub resource_group: String,
    pub location: Option<String>,
    pub routes: Vec<RouteEntry>,
    pub disable_bgp_route_propagation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    pub name: Option<String>,
    pub address_prefix: Option<String>,
    pub next_hop_type: Option<String>,
    pub next_hop_ip_address: Option<String>,
    pub provisioning_state: Option<String>,
}
