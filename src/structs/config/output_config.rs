use serde::{Deserialize, Serialize};
use crate::config::constants::DEFAULT_REPORTS_DIR;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,

    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_reports_dir() -> String {
    DEFAULT_REPORTS_DIR.to_string()
}

fn default_formats() -> Vec<String> {
    vec!["markdown".to_string(), "json".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            formats: default_formats(),
        }
    }
}
