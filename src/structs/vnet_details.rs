use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VnetDetails {
    pub id: String,
    pub name: Option<String>,
    pub resource_group: String,
    pub location: Option<String>,
    pub address_space: Vec<String>,
    pub dns_servers: Vec<String>,
    pub subnets_count: usize,
    pub enable_ddos_protection: bool,
    pub enable_vm_protection: bool,
}
