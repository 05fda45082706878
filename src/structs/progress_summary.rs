use serde::Serialize;
use crate::structs::analysis_step::AnalysisStep;

/// Final accounting of an orchestration's progress trace.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ProgressSummary {
    pub total_duration_secs: f64,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub successful_steps: usize,
    pub failed_steps: usize,
    pub step_details: Vec<AnalysisStep>,
}
