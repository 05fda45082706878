use serde::Serialize;
use crate::enums::hub_type::HubType;
use crate::structs::analysis_bundle::AnalysisBundle;
use crate::structs::progress_summary::ProgressSummary;

/// Complete payload of one connectivity analysis run: the merged stage
/// results plus the progress trace summary.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityAnalysis {
    pub hub_type: HubType,
    pub workspace_name: String,
    pub results: AnalysisBundle,
    pub summary: ProgressSummary,
}
