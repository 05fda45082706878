use serde::Serialize;

/// Per-stage slot in the merged analysis bundle. A degraded stage keeps
/// whatever partial data it produced alongside the error.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StageOutcome<T> {
    Complete(T),
    Degraded {
        error: String,
        #[serde(rename = "partial_data")]
        partial: Option<T>,
    },
}

impl<T> StageOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Complete(data) => Some(data),
            Self::Degraded { partial, .. } => partial.as_ref(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}
