use serde::Serialize;
use serde_json::Value;
use crate::enums::difference_type::DifferenceType;
use crate::enums::severity::Severity;

/// One detected divergence between two workspace configurations.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityDifference {
    pub category: String,
    pub workspace1_value: Value,
    pub workspace2_value: Value,
    pub difference_type: DifferenceType,
    pub severity: Severity,
    pub description: String,
}
