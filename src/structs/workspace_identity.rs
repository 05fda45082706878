use serde::Serialize;
use crate::enums::hub_type::HubType;

/// Identifies one workspace for analysis or comparison.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceIdentity {
    pub name: String,
    pub resource_group: String,
    pub hub_type: HubType,
}
