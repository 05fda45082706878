use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome envelope produced by every analysis stage. A failed result may
/// still carry partial data; it is never discarded.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> AnalysisResult<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(message: &str, error: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(error.to_string()),
            timestamp: Utc::now(),
        }
    }

    pub fn failure_with_partial(message: &str, error: &str, partial: T) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: Some(partial),
            error: Some(error.to_string()),
            timestamp: Utc::now(),
        }
    }
}
