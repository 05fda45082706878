use serde::{Deserialize, Serialize};
use crate::config::constants::{RESOURCE_QUERY_TIMEOUT_SECS, WORKSPACE_QUERY_TIMEOUT_SECS};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    /// Timeout for workspace-level and list queries
    #[serde(default = "default_workspace_timeout")]
    pub workspace_timeout_secs: u64,

    /// Timeout for per-resource detail queries
    #[serde(default = "default_resource_timeout")]
    pub resource_timeout_secs: u64,

    #[serde(default)]
    pub verbose: bool,
}

fn default_workspace_timeout() -> u64 {
    WORKSPACE_QUERY_TIMEOUT_SECS
}

fn default_resource_timeout() -> u64 {
    RESOURCE_QUERY_TIMEOUT_SECS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workspace_timeout_secs: default_workspace_timeout(),
            resource_timeout_secs: default_resource_timeout(),
            verbose: false,
        }
    }
}
