use std::path::PathBuf;
use serde_json::Value;
use crate::config::constants::ANALYSIS_STEP_COUNT;
use crate::enums::hub_type::HubType;
use crate::enums::network_type::NetworkType;
use crate::errors::MlConnectResult;
use crate::helpers::validators;
use crate::logger::progress_tracker::ProgressTracker;
use crate::services::azure_cli::AzureCli;
use crate::services::network_analyzer::NetworkAnalyzer;
use crate::services::report_generator::MarkdownReportGenerator;
use crate::services::resource_discovery::ResourceDiscovery;
use crate::services::vnet_analyzer::VnetAnalyzer;
use crate::services::workspace_analyzer::WorkspaceAnalyzer;
use crate::structs::analysis_bundle::AnalysisBundle;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::connectivity_analysis::ConnectivityAnalysis;
use crate::structs::stage_outcome::StageOutcome;
use crate::structs::workspace_summary::WorkspaceSummary;

/// Orchestrates the full connectivity analysis: a fixed six-step sequence
/// where the first two steps are fatal and every later stage degrades into
/// partial results instead of aborting the run.
pub struct ConnectivityAnalyzer {
    azure_cli: AzureCli,
    workspace_name: String,
    resource_group: String,
    hub_type: HubType,
    verbose: bool,
    reports_dir: PathBuf,
}

impl ConnectivityAnalyzer {
    pub fn new(
        azure_cli: AzureCli,
        workspace_name: &str,
        resource_group: &str,
        hub_type: HubType,
        verbose: bool,
        reports_dir: PathBuf,
    ) -> Self {
        Self {
            azure_cli,
            workspace_name: workspace_name.to_string(),
            resource_group: resource_group.to_string(),
            hub_type,
            verbose,
            reports_dir,
        }
    }

    /// Run the complete analysis. Never returns an error: unexpected
    /// failures are converted into a failure envelope at this boundary.
    pub async fn analyze(&self) -> AnalysisResult<ConnectivityAnalysis> {
        match self.run_analysis().await {
            Ok(result) => result,
            Err(e) => {
                log::error!("❌ Unexpected error during analysis: {}", e);
                AnalysisResult::failure("Analysis failed due to unexpected error", &e.to_string())
            }
        }
    }

    async fn run_analysis(&self) -> MlConnectResult<AnalysisResult<ConnectivityAnalysis>> {
        let mut tracker = ProgressTracker::new(ANALYSIS_STEP_COUNT, self.verbose);
        let mut bundle = AnalysisBundle::default();

        // Step 1: prerequisites (fatal)
        tracker.start_step("Validating prerequisites", "Checking Azure CLI and permissions");
        if !validators::validate_azure_cli(&self.azure_cli).await {
            let message = "Azure CLI not found or ML extension not installed";
            tracker.complete_step(false, message);
            return Ok(AnalysisResult::failure(
                message,
                "Please install Azure CLI and run 'az login' and 'az extension add -n ml'",
            ));
        }
        tracker.complete_step(true, "");

        // Step 2: workspace connection (fatal)
        tracker.start_step(
            "Connecting to workspace/hub",
            &format!("Connecting to {}", self.workspace_name),
        );
        let (workspace_summary, workspace_info) = match self.connect_to_workspace().await {
            Ok(connected) => connected,
            Err(e) => {
                let message = format!("Failed to connect to workspace: {}", e);
                tracker.complete_step(false, &message);
                return Ok(AnalysisResult::failure(&message, &e.to_string()));
            }
        };
        tracker.complete_step(true, "");
        bundle.workspace = Some(workspace_summary);

        // Step 3: network analysis (non-fatal)
        tracker.start_step(
            "Analyzing network configuration",
            "Discovering network isolation and connectivity settings",
        );
        let network_analyzer = NetworkAnalyzer::new(
            self.azure_cli.clone(),
            &self.workspace_name,
            &self.resource_group,
        );
        let network_result = network_analyzer.analyze().await;

        if let (true, Some(mut report)) = (network_result.success, network_result.data.clone()) {
            tracker.complete_step(true, "");

            if report.network_type == NetworkType::Customer {
                let vnet_analyzer = VnetAnalyzer::new(self.azure_cli.clone());
                report.vnet_details =
                    Some(vnet_analyzer.analyze_workspace_vnet(&workspace_info).await);
            }

            bundle.network = Some(StageOutcome::Complete(report));
        } else {
            tracker.complete_step(false, &network_result.message);
            log::warn!("⚠️ Network analysis partially failed: {}", network_result.message);
            bundle.network = Some(StageOutcome::Degraded {
                error: network_result.message.clone(),
                partial: network_result.data,
            });
        }

        // Step 4: resource discovery (non-fatal)
        tracker.start_step(
            "Discovering connected resources",
            "Finding all resources connected to the workspace",
        );
        let mut resource_discovery = ResourceDiscovery::new(
            self.azure_cli.clone(),
            &self.workspace_name,
            &self.resource_group,
            self.hub_type,
        )
        .with_deep_analysis(self.verbose);
        let resource_result = resource_discovery.analyze().await;

        if resource_result.success {
            tracker.complete_step(true, "");
            bundle.connected_resources = resource_result.data.map(StageOutcome::Complete);
        } else {
            tracker.complete_step(false, &resource_result.message);
            log::warn!("⚠️ Resource discovery partially failed: {}", resource_result.message);
            bundle.connected_resources = Some(StageOutcome::Degraded {
                error: resource_result.message.clone(),
                partial: resource_result.data,
            });
        }

        // Step 5: security settings. The security analysis itself lives in
        // steps 3 and 4; this step exists to keep the trace complete.
        tracker.start_step("Analyzing security settings", "Performing comprehensive security analysis");
        tracker.complete_step(true, "Security analysis completed");

        // Step 6: report generation (non-fatal)
        tracker.start_step("Generating report", "Creating comprehensive connectivity analysis report");
        let snapshot = ConnectivityAnalysis {
            hub_type: self.hub_type,
            workspace_name: self.workspace_name.clone(),
            results: bundle.clone(),
            summary: tracker.get_summary(),
        };
        match MarkdownReportGenerator::new(snapshot).save_to_dir(&self.reports_dir) {
            Ok(report_path) => {
                let location = report_path.display().to_string();
                tracker.complete_step(true, &format!("Report saved to {}", location));
                bundle.report_location = Some(location);
            }
            Err(e) => {
                tracker.complete_step(false, &format!("Report generation failed: {}", e));
                log::warn!("⚠️ Report generation failed: {}", e);
            }
        }

        Ok(AnalysisResult::success(
            "Connectivity analysis completed successfully",
            ConnectivityAnalysis {
                hub_type: self.hub_type,
                workspace_name: self.workspace_name.clone(),
                results: bundle,
                summary: tracker.get_summary(),
            },
        ))
    }

    async fn connect_to_workspace(&self) -> MlConnectResult<(WorkspaceSummary, Value)> {
        let (analyzer, workspace_info) = WorkspaceAnalyzer::for_workspace(
            self.azure_cli.clone(),
            &self.workspace_name,
            &self.resource_group,
            self.hub_type,
        )
        .await?;

        let config = analyzer.analyze(&workspace_info).await;
        Ok((WorkspaceSummary::from(&config), workspace_info))
    }
}
