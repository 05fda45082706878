use serde::Serialize;

/// Aggregate security posture across all discovered resources.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SecuritySummary {
    pub total_resources: usize,
    pub public_accessible: usize,
    pub private_endpoint_protected: usize,
    /// Mean of per-resource scores, one decimal; 0.0 when no resources
    pub average_security_score: f64,
    pub recommendations: Vec<String>,
}
