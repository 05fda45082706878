use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::enums::step_status::StepStatus;

/// One timed step in an orchestration run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStep {
    pub step: usize,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
