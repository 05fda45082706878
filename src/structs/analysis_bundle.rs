use serde::Serialize;
use crate::structs::discovery_report::DiscoveryReport;
use crate::structs::network_report::NetworkReport;
use crate::structs::stage_outcome::StageOutcome;
use crate::structs::workspace_summary::WorkspaceSummary;

/// Merged per-stage results of one orchestrated analysis run. Owned
/// exclusively by the orchestrator while the run is in flight.
#[derive(Debug, Clone, Serialize, Default)]
pub struct AnalysisBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<StageOutcome<NetworkReport>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_resources: Option<StageOutcome<DiscoveryReport>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_location: Option<String>,
}

impl AnalysisBundle {
    pub fn network_report(&self) -> Option<&NetworkReport> {
        self.network.as_ref().and_then(|outcome| outcome.data())
    }

    pub fn discovery_report(&self) -> Option<&DiscoveryReport> {
        self.connected_resources.as_ref().and_then(|outcome| outcome.data())
    }

    pub fn has_degraded_stage(&self) -> bool {
        self.network.as_ref().is_some_and(|o| o.is_degraded())
            || self.connected_resources.as_ref().is_some_and(|o| o.is_degraded())
    }
}
