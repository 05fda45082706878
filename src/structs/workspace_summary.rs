use serde::Serialize;
use crate::enums::hub_type::HubType;
use crate::enums::isolation_mode::IsolationMode;
use crate::structs::workspace_config::WorkspaceConfig;

/// Condensed workspace facts recorded as the connect step's payload.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSummary {
    pub name: String,
    pub location: String,
    pub network_mode: String,
    pub isolation_mode: Option<IsolationMode>,
    pub hub_type: HubType,
}

impl From<&WorkspaceConfig> for WorkspaceSummary {
    fn from(config: &WorkspaceConfig) -> Self {
        Self {
            name: config.name.clone(),
            location: config.location.clone(),
            network_mode: config.network_mode.clone(),
            isolation_mode: config.isolation_mode,
            hub_type: config.hub_type,
        }
    }
}
