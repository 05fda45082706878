use serde::Serialize;
use crate::enums::hub_type::HubType;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::connectivity_analysis::ConnectivityAnalysis;
use crate::structs::connectivity_difference::ConnectivityDifference;

/// Full outcome of comparing two workspaces.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub workspace1: ComparisonSide,
    pub workspace2: ComparisonSide,
    pub differences: DifferenceSet,
    pub summary: ComparisonSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSide {
    pub name: String,
    pub resource_group: String,
    pub hub_type: HubType,
    pub analysis: AnalysisResult<ConnectivityAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferenceSet {
    pub all: Vec<ConnectivityDifference>,
    pub total_count: usize,
}

impl DifferenceSet {
    pub fn new(all: Vec<ConnectivityDifference>) -> Self {
        let total_count = all.len();
        Self { all, total_count }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub total_differences: usize,
    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
    pub categories: Vec<String>,
    pub recommendation: String,
}
