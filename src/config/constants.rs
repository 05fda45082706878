use std::time::Duration;

pub const PROBE_TIMEOUT_SECS: u64 = 10;
pub const RESOURCE_QUERY_TIMEOUT_SECS: u64 = 30;
pub const WORKSPACE_QUERY_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_REPORTS_DIR: &str = "connectivity-reports";
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const REPORT_VERSION: &str = "1.0.0";

pub const CONFIG_DIR_NAME: &str = ".mlconnect";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ANALYSIS_STEP_COUNT: usize = 6;

pub const SUPPORTED_REPORT_FORMATS: &[&str] = &["markdown", "json"];

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
