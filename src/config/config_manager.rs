use std::fs;
use std::path::PathBuf;
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, SUPPORTED_REPORT_FORMATS};
use crate::errors::{MlConnectError, MlConnectResult, ResultExt};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn load() -> MlConnectResult<Config> {
        let config_path = Self::config_file_path();

        if let Some(path) = &config_path {
            if path.exists() {
                log::info!("📋 Loading config from: {}", path.display());
                let content = fs::read_to_string(path).map_err(|e| {
                    MlConnectError::ConfigurationFileError {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?;
                let config: Config =
                    toml::from_str(&content).with_context("loading configuration")?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    pub fn create_sample_config() -> MlConnectResult<PathBuf> {
        let sample_config = r#"# MLConnect Configuration

[analysis]
# Timeout for workspace-level and list queries (seconds)
workspace_timeout_secs = 60

# Timeout for per-resource detail queries (seconds)
resource_timeout_secs = 30

# Show per-step descriptions during analysis
verbose = false

[output]
# Directory where connectivity reports are written
reports_dir = "connectivity-reports"

# Report representations to generate
formats = ["markdown", "json"]
"#;

        let config_dir = Self::config_dir_path().ok_or_else(|| {
            MlConnectError::system_error("config initialization", "Could not determine home directory")
        })?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        fs::create_dir_all(&config_dir)?;
        fs::write(&config_path, sample_config)?;
        log::info!("✅ Created sample config at: {}", config_path.display());

        Ok(config_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.output.reports_dir.trim().is_empty() {
            errors.push("Output reports_dir must not be empty".to_string());
        }

        for format in &config.output.formats {
            if !SUPPORTED_REPORT_FORMATS.contains(&format.as_str()) {
                errors.push(format!(
                    "Unsupported report format '{}' (supported: {})",
                    format,
                    SUPPORTED_REPORT_FORMATS.join(", ")
                ));
            }
        }

        if config.analysis.workspace_timeout_secs == 0 {
            errors.push("analysis.workspace_timeout_secs must be greater than zero".to_string());
        }
        if config.analysis.resource_timeout_secs == 0 {
            errors.push("analysis.resource_timeout_secs must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn config_dir_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME))
    }

    fn config_file_path() -> Option<PathBuf> {
        Self::config_dir_path().map(|d| d.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(ConfigManager::validate_config(&config).is_ok());
    }

    #[test]
    fn empty_reports_dir_is_rejected() {
        let mut config = Config::default();
        config.output.reports_dir = "  ".to_string();
        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("reports_dir"));
    }

    #[test]
    fn unknown_format_and_zero_timeout_are_rejected() {
        let mut config = Config::default();
        config.output.formats = vec!["pdf".to_string()];
        config.analysis.resource_timeout_secs = 0;
        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn sample_config_parses_back() {
        let sample = r#"
[analysis]
workspace_timeout_secs = 45

[output]
reports_dir = "out"
"#;
        let config: Config = toml::from_str(sample).unwrap();
        assert_eq!(config.analysis.workspace_timeout_secs, 45);
        assert_eq!(config.analysis.resource_timeout_secs, 30);
        assert_eq!(config.output.reports_dir, "out");
        assert_eq!(config.output.formats, vec!["markdown", "json"]);
    }
}
