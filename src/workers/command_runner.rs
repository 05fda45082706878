use std::path::PathBuf;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::PROBE_TIMEOUT_SECS;
use crate::enums::commands::Commands;
use crate::enums::hub_type::HubType;
use crate::enums::run_outcome::RunOutcome;
use crate::errors::{MlConnectError, MlConnectResult};
use crate::helpers::validators;
use crate::mlconnect_error;
use crate::services::azure_cli::AzureCli;
use crate::services::comparison_analyzer::ComparisonAnalyzer;
use crate::services::connectivity_analyzer::ConnectivityAnalyzer;
use crate::services::summary_generator::SummaryGenerator;
use crate::structs::workspace_identity::WorkspaceIdentity;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> MlConnectResult<RunOutcome> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Analyze { workspace, resource_group, subscription, hub_type, verbose } => {
                self.analyze_command(workspace, resource_group, subscription, hub_type, verbose).await
            }
            Commands::Compare {
                workspace1,
                resource_group1,
                workspace2,
                resource_group2,
                subscription,
                hub_type,
            } => {
                self.compare_command(
                    workspace1,
                    resource_group1,
                    workspace2,
                    resource_group2,
                    subscription,
                    hub_type,
                )
                .await
            }
            Commands::Validate => self.validate_command().await,
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> MlConnectResult<RunOutcome> {
        log::info!("🚀 Initializing mlconnect configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Edit the configuration file to adjust timeouts and output settings.");
                log::info!("🔧 Run 'mlconnect validate' to check your environment.");
                Ok(RunOutcome::Success)
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                Err(e)
            }
        }
    }

    async fn analyze_command(
        &self,
        workspace: String,
        resource_group: String,
        subscription: Option<String>,
        hub_type: HubType,
        verbose: bool,
    ) -> MlConnectResult<RunOutcome> {
        log::info!("🔍 Starting connectivity analysis...");

        Self::check_identity_formats(&workspace, &resource_group)?;
        let config = Self::load_config()?;

        let azure_cli = AzureCli::new(subscription);
        let analyzer = ConnectivityAnalyzer::new(
            azure_cli,
            &workspace,
            &resource_group,
            hub_type,
            verbose || config.analysis.verbose,
            PathBuf::from(&config.output.reports_dir),
        );

        let result = analyzer.analyze().await;

        let analysis = match (result.success, result.data) {
            (true, Some(analysis)) => analysis,
            (_, _) => {
                log::error!("❌ Analysis failed: {}", result.message);
                return Err(mlconnect_error!(
                    analysis,
                    &workspace,
                    "connectivity analysis",
                    result.error.as_deref().unwrap_or(&result.message)
                ));
            }
        };

        let summary = SummaryGenerator::new(&analysis);
        log::info!("{}", summary.generate_cli_summary());
        log::info!("{}", summary.generate_security_summary());
        if verbose || config.analysis.verbose {
            log::info!("{}", summary.generate_resource_summary());
        }

        if analysis.results.has_degraded_stage() {
            log::warn!("⚠️ Some analysis stages returned partial results.");
            return Ok(RunOutcome::PartialSuccess);
        }

        Ok(RunOutcome::Success)
    }

    async fn compare_command(
        &self,
        workspace1: String,
        resource_group1: String,
        workspace2: String,
        resource_group2: Option<String>,
        subscription: Option<String>,
        hub_type: HubType,
    ) -> MlConnectResult<RunOutcome> {
        log::info!("⚖️ Starting workspace comparison...");

        let resource_group2 = resource_group2.unwrap_or_else(|| resource_group1.clone());
        Self::check_identity_formats(&workspace1, &resource_group1)?;
        Self::check_identity_formats(&workspace2, &resource_group2)?;
        let config = Self::load_config()?;

        let identity1 = WorkspaceIdentity {
            name: workspace1,
            resource_group: resource_group1,
            hub_type,
        };
        let identity2 = WorkspaceIdentity {
            name: workspace2,
            resource_group: resource_group2,
            hub_type,
        };

        let analyzer = ComparisonAnalyzer::new(
            AzureCli::new(subscription),
            PathBuf::from(&config.output.reports_dir),
        );
        let comparison = analyzer.compare_workspaces(&identity1, &identity2).await;

        let any_failure = !comparison.workspace1.analysis.success
            || !comparison.workspace2.analysis.success;
        let any_degraded = [&comparison.workspace1, &comparison.workspace2].iter().any(|side| {
            side.analysis.data.as_ref()
                .map(|a| a.results.has_degraded_stage())
                .unwrap_or(false)
        });

        if any_failure || any_degraded {
            log::warn!("⚠️ Comparison completed with partial analysis results.");
            return Ok(RunOutcome::PartialSuccess);
        }

        Ok(RunOutcome::Success)
    }

    async fn validate_command(&self) -> MlConnectResult<RunOutcome> {
        log::info!("🔍 Validating mlconnect configuration...");

        let config = match ConfigManager::load() {
            Ok(config) => {
                log::info!("✅ Configuration file loaded successfully");
                config
            }
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'mlconnect init' to create a configuration file.");
                return Err(e);
            }
        };

        if let Err(errors) = ConfigManager::validate_config(&config) {
            log::error!("❌ Configuration issues found:");
            for error in &errors {
                log::error!("   - {}", error);
            }
            return Err(MlConnectError::config_error(
                "Configuration validation failed",
                None,
                Some("Fix the issues above and run 'mlconnect validate' again"),
            ));
        }
        log::info!("✅ Configuration is valid");

        log::info!("\n🔍 Checking Azure CLI prerequisites...");
        let azure_cli = AzureCli::new(None);

        let cli_installed = azure_cli.run_command_raw(&["--version"], PROBE_TIMEOUT_SECS).await.is_some();
        log::info!("   {} Azure CLI installed", if cli_installed { "✅" } else { "❌" });

        let logged_in = cli_installed && azure_cli.is_logged_in().await;
        log::info!("   {} Azure CLI authenticated", if logged_in { "✅" } else { "❌" });

        let prerequisites_ok = validators::validate_azure_cli(&azure_cli).await;
        log::info!("   {} Azure ML extension available", if prerequisites_ok { "✅" } else { "❌" });

        if !prerequisites_ok {
            return Err(MlConnectError::prerequisite_error(
                "Azure CLI",
                "One or more prerequisite checks failed",
            ));
        }

        log::info!("✅ Environment is ready for analysis");
        Ok(RunOutcome::Success)
    }

    fn check_identity_formats(workspace: &str, resource_group: &str) -> MlConnectResult<()> {
        if !validators::validate_workspace_name(workspace) {
            return Err(mlconnect_error!(
                validation,
                "workspace",
                workspace,
                "3-33 alphanumeric characters or hyphens, starting and ending alphanumeric"
            ));
        }

        if !validators::validate_resource_group_name(resource_group) {
            return Err(mlconnect_error!(
                validation,
                "resource-group",
                resource_group,
                "1-90 characters of alphanumerics, periods, underscores, hyphens and parentheses"
            ));
        }

        Ok(())
    }

    fn load_config() -> MlConnectResult<crate::structs::config::config::Config> {
        match ConfigManager::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'mlconnect init' to create a configuration file.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_format_checks_reject_bad_names() {
        assert!(CommandRunner::check_identity_formats("ws1", "rg").is_ok());
        assert!(CommandRunner::check_identity_formats("x", "rg").is_err());
        assert!(CommandRunner::check_identity_formats("ws1", "bad rg").is_err());
    }
}
