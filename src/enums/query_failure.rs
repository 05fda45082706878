use thiserror::Error;

/// Why a gateway query produced no result. Only used for logging at the
/// subprocess boundary; callers see `Option::None`.
#[derive(Debug, Error)]
pub enum QueryFailure {
    #[error("failed to launch command: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("command exited with status {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
    #[error("command timed out after {0} seconds")]
    TimedOut(u64),
    #[error("failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
