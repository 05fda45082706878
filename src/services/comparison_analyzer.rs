use std::collections::BTreeSet;
use std::path::PathBuf;
use serde_json::{json, Value};
use crate::enums::difference_type::DifferenceType;
use crate::enums::network_type::NetworkType;
use crate::enums::severity::Severity;
use crate::helpers::report_formatter;
use crate::services::azure_cli::AzureCli;
use crate::services::connectivity_analyzer::ConnectivityAnalyzer;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::comparison_report::{ComparisonReport, ComparisonSide, ComparisonSummary, DifferenceSet};
use crate::structs::connectivity_analysis::ConnectivityAnalysis;
use crate::structs::connectivity_difference::ConnectivityDifference;
use crate::structs::discovery_report::DiscoveryReport;
use crate::structs::network_report::NetworkReport;
use crate::structs::workspace_identity::WorkspaceIdentity;

/// Runs two independent orchestrations and diffs their outputs across
/// categorized dimensions with fixed severities.
pub struct ComparisonAnalyzer {
    azure_cli: AzureCli,
    reports_dir: PathBuf,
}

impl ComparisonAnalyzer {
    pub fn new(azure_cli: AzureCli, reports_dir: PathBuf) -> Self {
        Self { azure_cli, reports_dir }
    }

    pub async fn compare_workspaces(
        &self,
        workspace1: &WorkspaceIdentity,
        workspace2: &WorkspaceIdentity,
    ) -> ComparisonReport {
        log::info!("⚖️ Workspace Comparison Analysis");

        log::info!("🔍 Analyzing {}...", workspace1.name);
        let analysis1 = self.run_analysis(workspace1).await;

        log::info!("🔍 Analyzing {}...", workspace2.name);
        let analysis2 = self.run_analysis(workspace2).await;

        let comparison = Self::generate_comparison(workspace1, analysis1, workspace2, analysis2);
        Self::display_comparison_results(&comparison);

        comparison
    }

    async fn run_analysis(&self, workspace: &WorkspaceIdentity) -> AnalysisResult<ConnectivityAnalysis> {
        ConnectivityAnalyzer::new(
            self.azure_cli.clone(),
            &workspace.name,
            &workspace.resource_group,
            workspace.hub_type,
            false,
            self.reports_dir.clone(),
        )
        .analyze()
        .await
    }

    /// Pure comparison over two finished analyses.
    pub fn generate_comparison(
        ws1: &WorkspaceIdentity,
        analysis1: AnalysisResult<ConnectivityAnalysis>,
        ws2: &WorkspaceIdentity,
        analysis2: AnalysisResult<ConnectivityAnalysis>,
    ) -> ComparisonReport {
        let mut differences = Vec::new();

        differences.extend(Self::compare_basic_settings(ws1, &analysis1, ws2, &analysis2));
        differences.extend(Self::compare_network_config(&analysis1, &analysis2));
        differences.extend(Self::compare_connected_resources(&analysis1, &analysis2));
        differences.extend(Self::compare_outbound_rules(&analysis1, &analysis2));

        let summary = Self::generate_summary(&differences);

        ComparisonReport {
            workspace1: ComparisonSide {
                name: ws1.name.clone(),
                resource_group: ws1.resource_group.clone(),
                hub_type: ws1.hub_type,
                analysis: analysis1,
            },
            workspace2: ComparisonSide {
                name: ws2.name.clone(),
                resource_group: ws2.resource_group.clone(),
                hub_type: ws2.hub_type,
                analysis: analysis2,
            },
            differences: DifferenceSet::new(differences),
            summary,
        }
    }

    fn network_report(analysis: &AnalysisResult<ConnectivityAnalysis>) -> Option<&NetworkReport> {
        analysis.data.as_ref().and_then(|a| a.results.network_report())
    }

    fn discovery_report(analysis: &AnalysisResult<ConnectivityAnalysis>) -> Option<&DiscoveryReport> {
        analysis.data.as_ref().and_then(|a| a.results.discovery_report())
    }

    fn compare_basic_settings(
        ws1: &WorkspaceIdentity,
        analysis1: &AnalysisResult<ConnectivityAnalysis>,
        ws2: &WorkspaceIdentity,
        analysis2: &AnalysisResult<ConnectivityAnalysis>,
    ) -> Vec<ConnectivityDifference> {
        let mut differences = Vec::new();

        if ws1.hub_type != ws2.hub_type {
            differences.push(ConnectivityDifference {
                category: "Workspace Type".to_string(),
                workspace1_value: json!(ws1.hub_type),
                workspace2_value: json!(ws2.hub_type),
                difference_type: DifferenceType::Changed,
                severity: Severity::Medium,
                description: format!(
                    "Different workspace types: {} vs {}",
                    ws1.hub_type, ws2.hub_type
                ),
            });
        }

        let public1 = Self::public_access_value(analysis1);
        let public2 = Self::public_access_value(analysis2);

        if public1 != public2 {
            differences.push(ConnectivityDifference {
                category: "Public Network Access".to_string(),
                workspace1_value: public1.clone(),
                workspace2_value: public2.clone(),
                difference_type: DifferenceType::Changed,
                severity: Severity::High,
                description: format!(
                    "Public network access differs: {} vs {}",
                    display_value(&public1),
                    display_value(&public2)
                ),
            });
        }

        differences
    }

    fn public_access_value(analysis: &AnalysisResult<ConnectivityAnalysis>) -> Value {
        match Self::network_report(analysis) {
            Some(network) => json!(network.public_network_access),
            None => json!("Unknown"),
        }
    }

    fn compare_network_config(
        analysis1: &AnalysisResult<ConnectivityAnalysis>,
        analysis2: &AnalysisResult<ConnectivityAnalysis>,
    ) -> Vec<ConnectivityDifference> {
        let mut differences = Vec::new();

        let vnet1_enabled = Self::vnet_integration_enabled(analysis1);
        let vnet2_enabled = Self::vnet_integration_enabled(analysis2);

        if vnet1_enabled != vnet2_enabled {
            differences.push(ConnectivityDifference {
                category: "VNet Integration".to_string(),
                workspace1_value: json!(vnet1_enabled),
                workspace2_value: json!(vnet2_enabled),
                difference_type: DifferenceType::Changed,
                severity: Severity::High,
                description: format!(
                    "VNet integration differs: {} vs {}",
                    vnet1_enabled, vnet2_enabled
                ),
            });
        }

        let pe1_count = Self::network_report(analysis1).map(|n| n.private_endpoints.count).unwrap_or(0);
        let pe2_count = Self::network_report(analysis2).map(|n| n.private_endpoints.count).unwrap_or(0);

        if pe1_count != pe2_count {
            differences.push(ConnectivityDifference {
                category: "Private Endpoints".to_string(),
                workspace1_value: json!(pe1_count),
                workspace2_value: json!(pe2_count),
                difference_type: DifferenceType::Changed,
                severity: Severity::Medium,
                description: format!(
                    "Private endpoint count differs: {} vs {}",
                    pe1_count, pe2_count
                ),
            });
        }

        differences
    }

    fn vnet_integration_enabled(analysis: &AnalysisResult<ConnectivityAnalysis>) -> bool {
        Self::network_report(analysis)
            .map(|network| network.network_type != NetworkType::None)
            .unwrap_or(false)
    }

    fn compare_connected_resources(
        analysis1: &AnalysisResult<ConnectivityAnalysis>,
        analysis2: &AnalysisResult<ConnectivityAnalysis>,
    ) -> Vec<ConnectivityDifference> {
        let mut differences = Vec::new();

        let types1 = Self::resource_types(analysis1);
        let types2 = Self::resource_types(analysis2);

        for resource_type in types1.difference(&types2) {
            differences.push(ConnectivityDifference {
                category: "Connected Resources".to_string(),
                workspace1_value: json!(resource_type),
                workspace2_value: json!("Not present"),
                difference_type: DifferenceType::Removed,
                severity: Severity::Medium,
                description: format!("Resource type {} only in first workspace", resource_type),
            });
        }

        for resource_type in types2.difference(&types1) {
            differences.push(ConnectivityDifference {
                category: "Connected Resources".to_string(),
                workspace1_value: json!("Not present"),
                workspace2_value: json!(resource_type),
                difference_type: DifferenceType::Added,
                severity: Severity::Medium,
                description: format!("Resource type {} only in second workspace", resource_type),
            });
        }

        differences
    }

    fn resource_types(analysis: &AnalysisResult<ConnectivityAnalysis>) -> BTreeSet<String> {
        Self::discovery_report(analysis)
            .map(|report| report.resources_by_type.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn compare_outbound_rules(
        analysis1: &AnalysisResult<ConnectivityAnalysis>,
        analysis2: &AnalysisResult<ConnectivityAnalysis>,
    ) -> Vec<ConnectivityDifference> {
        let mut differences = Vec::new();

        let count1 = Self::network_report(analysis1).map(|n| n.outbound_rules.count).unwrap_or(0);
        let count2 = Self::network_report(analysis2).map(|n| n.outbound_rules.count).unwrap_or(0);

        if count1 != count2 {
            differences.push(ConnectivityDifference {
                category: "Outbound Rules".to_string(),
                workspace1_value: json!(count1),
                workspace2_value: json!(count2),
                difference_type: DifferenceType::Changed,
                severity: Severity::Low,
                description: format!("Outbound rule count differs: {} vs {}", count1, count2),
            });
        }

        let types1 = Self::outbound_rule_types(analysis1);
        let types2 = Self::outbound_rule_types(analysis2);

        if !types1.is_empty() && !types2.is_empty() && types1 != types2 {
            differences.push(ConnectivityDifference {
                category: "Outbound Rule Types".to_string(),
                workspace1_value: json!(types1),
                workspace2_value: json!(types2),
                difference_type: DifferenceType::Changed,
                severity: Severity::Low,
                description: "Different outbound rule types configured".to_string(),
            });
        }

        differences
    }

    fn outbound_rule_types(analysis: &AnalysisResult<ConnectivityAnalysis>) -> BTreeSet<String> {
        Self::network_report(analysis)
            .map(|network| {
                network.outbound_rules.rules.iter_all()
                    .map(|rule| rule.rule_type.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn generate_summary(differences: &[ConnectivityDifference]) -> ComparisonSummary {
        let high = differences.iter().filter(|d| d.severity == Severity::High).count();
        let medium = differences.iter().filter(|d| d.severity == Severity::Medium).count();
        let low = differences.iter().filter(|d| d.severity == Severity::Low).count();

        let categories: BTreeSet<String> =
            differences.iter().map(|d| d.category.clone()).collect();

        ComparisonSummary {
            total_differences: differences.len(),
            high_severity: high,
            medium_severity: medium,
            low_severity: low,
            categories: categories.into_iter().collect(),
            recommendation: Self::recommendation(differences),
        }
    }

    /// First matching rule wins.
    fn recommendation(differences: &[ConnectivityDifference]) -> String {
        let high = differences.iter().filter(|d| d.severity == Severity::High).count();
        let medium = differences.iter().filter(|d| d.severity == Severity::Medium).count();

        if high > 0 {
            "CRITICAL: High-severity differences found that may impact connectivity".to_string()
        } else if medium > 3 {
            "WARNING: Multiple medium-severity differences found".to_string()
        } else if differences.len() > 10 {
            "INFO: Many configuration differences found".to_string()
        } else if differences.is_empty() {
            "SUCCESS: Workspaces have similar connectivity configurations".to_string()
        } else {
            "INFO: Minor configuration differences found".to_string()
        }
    }

    fn display_comparison_results(comparison: &ComparisonReport) {
        let summary = &comparison.summary;

        log::info!("\n📊 Comparison Summary");
        log::info!("Total Differences: {}", summary.total_differences);
        log::info!(
            "High Priority: {} | Medium Priority: {} | Low Priority: {}",
            summary.high_severity,
            summary.medium_severity,
            summary.low_severity,
        );
        log::info!("{}", summary.recommendation);

        if comparison.differences.total_count == 0 {
            log::info!("\n✅ No significant differences found!");
            return;
        }

        let rows: Vec<Vec<String>> = comparison.differences.all.iter()
            .map(|difference| {
                vec![
                    difference.category.clone(),
                    report_formatter::truncate_text(&display_value(&difference.workspace1_value), 25),
                    report_formatter::truncate_text(&display_value(&difference.workspace2_value), 25),
                    format!("{} {}", difference.severity.emoji(), difference.severity.as_str().to_uppercase()),
                    difference.description.clone(),
                ]
            })
            .collect();

        log::info!(
            "\n{}",
            report_formatter::format_table(
                &["Category", "Workspace 1", "Workspace 2", "Severity", "Description"],
                &rows,
            ),
        );
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::enums::hub_type::HubType;
    use crate::structs::analysis_bundle::AnalysisBundle;
    use crate::structs::network_report::{NetworkReport, OutboundRuleSection, PrivateEndpointSection};
    use crate::structs::network_summary::{ConnectivitySummary, InboundConnectivity, NetworkSummary};
    use crate::structs::outbound_rule::OutboundRule;
    use crate::structs::private_endpoint::PrivateEndpointInfo;
    use crate::structs::progress_summary::ProgressSummary;
    use crate::structs::stage_outcome::StageOutcome;
    use super::*;

    fn identity(name: &str, hub_type: HubType) -> WorkspaceIdentity {
        WorkspaceIdentity {
            name: name.to_string(),
            resource_group: "rg".to_string(),
            hub_type,
        }
    }

    fn network_report(
        network_type: NetworkType,
        public_access: bool,
        private_endpoint_count: usize,
        rule_types: &[&str],
    ) -> NetworkReport {
        let mut rules = OutboundRuleSection::default();
        for (index, rule_type) in rule_types.iter().enumerate() {
            let rule = OutboundRule {
                name: format!("rule-{}", index),
                rule_type: rule_type.to_string(),
                destination: String::new(),
                category: "user-defined".to_string(),
                status: "Active".to_string(),
            };
            match *rule_type {
                "fqdn" => rules.rules.fqdn.push(rule),
                "service_tag" => rules.rules.service_tag.push(rule),
                _ => rules.rules.other.push(rule),
            }
            rules.count += 1;
        }

        NetworkReport {
            network_type,
            isolation_mode: None,
            public_network_access: public_access,
            private_endpoints: PrivateEndpointSection {
                count: private_endpoint_count,
                endpoints: vec![PrivateEndpointInfo::default(); private_endpoint_count],
            },
            outbound_rules: rules,
            virtual_network: None,
            subnets: Vec::new(),
            summary: NetworkSummary {
                configuration_type: network_type,
                security_level: String::new(),
                connectivity: ConnectivitySummary {
                    inbound: InboundConnectivity {
                        public_access,
                        private_endpoints: private_endpoint_count,
                        service_endpoints: 0,
                    },
                    outbound: Default::default(),
                },
                key_findings: Vec::new(),
                recommendations: Vec::new(),
            },
            vnet_details: None,
        }
    }

    fn analysis_with(
        network: Option<NetworkReport>,
        resource_types: &[&str],
    ) -> AnalysisResult<ConnectivityAnalysis> {
        let mut bundle = AnalysisBundle {
            network: network.map(StageOutcome::Complete),
            ..Default::default()
        };

        if !resource_types.is_empty() {
            let mut report = crate::structs::discovery_report::DiscoveryReport::default();
            for resource_type in resource_types {
                report.resources_by_type.insert(resource_type.to_string(), Vec::new());
            }
            bundle.connected_resources = Some(StageOutcome::Complete(report));
        }

        AnalysisResult::success(
            "ok",
            ConnectivityAnalysis {
                hub_type: HubType::AzureMl,
                workspace_name: "ws".to_string(),
                results: bundle,
                summary: ProgressSummary::default(),
            },
        )
    }

    #[test]
    fn private_endpoint_count_mismatch_is_one_medium_difference() {
        let a1 = analysis_with(Some(network_report(NetworkType::Customer, false, 3, &[])), &[]);
        let a2 = analysis_with(Some(network_report(NetworkType::Customer, false, 0, &[])), &[]);

        let report = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            a1,
            &identity("ws2", HubType::AzureMl),
            a2,
        );

        let pe_differences: Vec<_> = report.differences.all.iter()
            .filter(|d| d.category == "Private Endpoints")
            .collect();
        assert_eq!(pe_differences.len(), 1);
        assert_eq!(pe_differences[0].severity, Severity::Medium);
        assert_eq!(pe_differences[0].workspace1_value, json!(3));
        assert_eq!(pe_differences[0].workspace2_value, json!(0));
    }

    #[test]
    fn comparison_is_symmetric_modulo_swapped_values() {
        let make1 = || analysis_with(
            Some(network_report(NetworkType::Managed, false, 2, &["fqdn"])),
            &["storageAccounts", "vaults"],
        );
        let make2 = || analysis_with(
            Some(network_report(NetworkType::None, true, 0, &["fqdn", "service_tag"])),
            &["storageAccounts", "accounts"],
        );

        let forward = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            make1(),
            &identity("ws2", HubType::AzureMl),
            make2(),
        );
        let backward = ComparisonAnalyzer::generate_comparison(
            &identity("ws2", HubType::AzureMl),
            make2(),
            &identity("ws1", HubType::AzureMl),
            make1(),
        );

        assert_eq!(
            forward.differences.total_count,
            backward.differences.total_count
        );
        assert_eq!(forward.summary.high_severity, backward.summary.high_severity);
        assert_eq!(forward.summary.low_severity, backward.summary.low_severity);
    }

    #[test]
    fn high_severity_difference_drives_critical_recommendation() {
        let a1 = analysis_with(Some(network_report(NetworkType::Managed, false, 0, &[])), &[]);
        let a2 = analysis_with(Some(network_report(NetworkType::Managed, true, 0, &[])), &[]);

        let report = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            a1,
            &identity("ws2", HubType::AzureMl),
            a2,
        );

        assert!(report.summary.recommendation.starts_with("CRITICAL"));
        assert!(report.summary.high_severity >= 1);
    }

    #[test]
    fn identical_workspaces_compare_clean() {
        let make = || analysis_with(
            Some(network_report(NetworkType::Managed, false, 1, &["fqdn"])),
            &["storageAccounts"],
        );

        let report = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            make(),
            &identity("ws2", HubType::AzureMl),
            make(),
        );

        assert_eq!(report.differences.total_count, 0);
        assert!(report.summary.recommendation.starts_with("SUCCESS"));
    }

    #[test]
    fn hub_type_mismatch_is_medium() {
        let report = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            analysis_with(None, &[]),
            &identity("hub1", HubType::AiFoundry),
            analysis_with(None, &[]),
        );

        let type_diff = report.differences.all.iter()
            .find(|d| d.category == "Workspace Type")
            .unwrap();
        assert_eq!(type_diff.severity, Severity::Medium);
    }

    #[test]
    fn resource_type_sets_produce_one_difference_per_type() {
        let a1 = analysis_with(None, &["storageAccounts", "vaults"]);
        let a2 = analysis_with(None, &["storageAccounts", "accounts"]);

        let report = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            a1,
            &identity("ws2", HubType::AzureMl),
            a2,
        );

        let resource_diffs: Vec<_> = report.differences.all.iter()
            .filter(|d| d.category == "Connected Resources")
            .collect();
        assert_eq!(resource_diffs.len(), 2);
        assert!(resource_diffs.iter().any(|d| d.difference_type == DifferenceType::Removed));
        assert!(resource_diffs.iter().any(|d| d.difference_type == DifferenceType::Added));
    }

    #[test]
    fn rule_type_comparison_requires_rules_on_both_sides() {
        let a1 = analysis_with(Some(network_report(NetworkType::Managed, false, 0, &["fqdn"])), &[]);
        let a2 = analysis_with(Some(network_report(NetworkType::Managed, false, 0, &[])), &[]);

        let report = ComparisonAnalyzer::generate_comparison(
            &identity("ws1", HubType::AzureMl),
            a1,
            &identity("ws2", HubType::AzureMl),
            a2,
        );

        // Count differs (low), but no rule-type difference since one side
        // has no rules at all
        assert!(report.differences.all.iter().any(|d| d.category == "Outbound Rules"));
        assert!(!report.differences.all.iter().any(|d| d.category == "Outbound Rule Types"));
    }
}
