use serde::Serialize;
use crate::enums::access_method::AccessMethod;
use crate::enums::connection_type::ConnectionType;
use crate::structs::connected_resource::ConnectedResource;

/// Per-resource row in the discovery report.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSummary {
    pub name: String,
    pub resource_group: String,
    pub connection_type: ConnectionType,
    pub access_method: AccessMethod,
    pub public_access: bool,
    pub security_score: u32,
    pub private_endpoints: usize,
}

impl From<&ConnectedResource> for ResourceSummary {
    fn from(resource: &ConnectedResource) -> Self {
        Self {
            name: resource.name.clone(),
            resource_group: resource.resource_group.clone(),
            connection_type: resource.connection_type,
            access_method: resource.access_method,
            public_access: resource.public_access_enabled,
            security_score: resource.security_score(),
            private_endpoints: resource.private_endpoints.len(),
        }
    }
}
