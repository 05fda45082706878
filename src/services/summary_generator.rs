use crate::helpers::report_formatter;
use crate::structs::connectivity_analysis::ConnectivityAnalysis;

/// Renders concise terminal summaries from a finished analysis.
pub struct SummaryGenerator<'a> {
    analysis: &'a ConnectivityAnalysis,
}

impl<'a> SummaryGenerator<'a> {
    pub fn new(analysis: &'a ConnectivityAnalysis) -> Self {
        Self { analysis }
    }

    pub fn generate_cli_summary(&self) -> String {
        let workspace = self.analysis.results.workspace.as_ref();
        let network = self.analysis.results.network_report();
        let resources = self.analysis.results.discovery_report();

        let mut output = format!("\n{}\n", "=".repeat(80));
        output.push_str("📊 CONNECTIVITY ANALYSIS SUMMARY\n");
        output.push_str(&format!("{}\n\n", "=".repeat(80)));

        output.push_str(&format!("📍 Workspace: {}\n", self.analysis.workspace_name));
        output.push_str(&format!("   Type: {}\n", self.analysis.hub_type.display_name()));
        output.push_str(&format!(
            "   Location: {}\n\n",
            workspace.map(|w| w.location.as_str()).unwrap_or("Unknown"),
        ));

        output.push_str("🌐 Network Configuration:\n");
        match network {
            Some(network) => {
                output.push_str(&format!("   Type: {}\n", network.network_type));
                output.push_str(&format!(
                    "   Public Access: {}\n",
                    if network.public_network_access { "⚠️ Enabled" } else { "✅ Disabled" },
                ));
                if network.private_endpoints.count > 0 {
                    output.push_str(&format!(
                        "   Private Endpoints: {}\n",
                        network.private_endpoints.count
                    ));
                }
                if network.outbound_rules.count > 0 {
                    output.push_str(&format!(
                        "   Outbound Rules: {}\n",
                        network.outbound_rules.count
                    ));
                }
            }
            None => output.push_str("   Type: Unknown\n"),
        }
        output.push('\n');

        output.push_str("🔗 Connected Resources:\n");
        let total = resources.map(|r| r.total_resources).unwrap_or(0);
        output.push_str(&format!("   Total: {}\n", total));

        if let Some(resources) = resources {
            let summary = &resources.security_summary;
            output.push_str(&format!(
                "   Average Security Score: {}\n",
                report_formatter::format_security_score(summary.average_security_score.round() as u32),
            ));
            output.push_str(&format!(
                "   Public Accessible: {}\n",
                report_formatter::format_resource_count(summary.public_accessible, summary.total_resources),
            ));
            output.push_str(&format!(
                "   Private Endpoint Protected: {}\n\n",
                report_formatter::format_resource_count(
                    summary.private_endpoint_protected,
                    summary.total_resources,
                ),
            ));

            if !resources.resources_by_type.is_empty() {
                output.push_str("📦 Resources by Type:\n");
                for (resource_type, entries) in &resources.resources_by_type {
                    let avg: f64 = if entries.is_empty() {
                        0.0
                    } else {
                        entries.iter().map(|r| r.security_score as f64).sum::<f64>()
                            / entries.len() as f64
                    };
                    output.push_str(&format!(
                        "   {}: {} (avg score: {:.1}/100)\n",
                        resource_type,
                        entries.len(),
                        avg,
                    ));
                }
                output.push('\n');
            }
        }

        let recommendations = self.collect_recommendations();
        if !recommendations.is_empty() {
            output.push_str("⚡ Key Recommendations:\n");
            for recommendation in recommendations.iter().take(3) {
                output.push_str(&format!("   • {}\n", recommendation));
            }
            if recommendations.len() > 3 {
                output.push_str(&format!(
                    "   ... and {} more recommendations\n",
                    recommendations.len() - 3
                ));
            }
            output.push('\n');
        }

        let summary = &self.analysis.summary;
        output.push_str("✅ Analysis Complete:\n");
        output.push_str(&format!(
            "   Duration: {}\n",
            report_formatter::format_duration(summary.total_duration_secs),
        ));
        output.push_str(&format!(
            "   Steps Completed: {}/{}\n",
            summary.successful_steps, summary.total_steps,
        ));
        if summary.failed_steps > 0 {
            output.push_str(&format!("   Failed Steps: {}\n", summary.failed_steps));
        }

        if let Some(location) = &self.analysis.results.report_location {
            output.push_str(&format!("\n📄 Full report saved to: {}\n", location));
            output.push_str(&format!(
                "   JSON data saved to: {}\n",
                location.replace(".md", ".json"),
            ));
        }

        output.push_str(&format!("\n{}\n", "=".repeat(80)));
        output
    }

    pub fn generate_security_summary(&self) -> String {
        let network = self.analysis.results.network_report();
        let security = self.analysis.results.discovery_report().map(|r| &r.security_summary);

        let mut output = String::from("\n🛡️  SECURITY ANALYSIS SUMMARY\n");
        output.push_str(&format!("{}\n\n", "=".repeat(50)));

        let average = security.map(|s| s.average_security_score).unwrap_or(0.0);
        output.push_str(&format!(
            "Overall Security Score: {}\n\n",
            report_formatter::format_security_score(average.round() as u32),
        ));

        output.push_str("Network Security:\n");
        match network {
            Some(network) if !network.public_network_access => {
                output.push_str("   ✅ Private network access only\n");
            }
            _ => output.push_str("   ⚠️  Public network access enabled\n"),
        }

        match network.and_then(|n| n.isolation_mode) {
            Some(crate::enums::isolation_mode::IsolationMode::AllowOnlyApprovedOutbound) => {
                output.push_str("   ✅ Strict outbound control enabled\n");
            }
            Some(crate::enums::isolation_mode::IsolationMode::AllowInternetOutbound) => {
                output.push_str("   ⚠️  Internet outbound allowed\n");
            }
            Some(mode) => output.push_str(&format!("   ℹ️  Isolation mode: {}\n", mode)),
            None => output.push_str("   ℹ️  Isolation mode: Not configured\n"),
        }
        output.push('\n');

        output.push_str("Resource Security:\n");
        match security {
            Some(summary) if summary.total_resources > 0 => {
                if summary.public_accessible == 0 {
                    output.push_str("   ✅ No resources with public access\n");
                } else {
                    output.push_str(&format!(
                        "   ⚠️  {} resources with public access\n",
                        summary.public_accessible
                    ));
                }

                if summary.private_endpoint_protected > 0 {
                    output.push_str(&format!(
                        "   ✅ {} resources protected with private endpoints\n",
                        summary.private_endpoint_protected
                    ));
                } else {
                    output.push_str("   ⚠️  No private endpoint protection found\n");
                }
            }
            _ => output.push_str("   ℹ️  No resources analyzed\n"),
        }
        output.push('\n');

        if let Some(summary) = security {
            if !summary.recommendations.is_empty() {
                output.push_str("Priority Actions:\n");
                for (index, recommendation) in summary.recommendations.iter().take(2).enumerate() {
                    output.push_str(&format!("   {}. {}\n", index + 1, recommendation));
                }
            }
        }

        output.push_str(&format!("\n{}\n", "=".repeat(50)));
        output
    }

    pub fn generate_resource_summary(&self) -> String {
        let mut output = String::from("\n🔗 RESOURCE CONNECTIVITY SUMMARY\n");
        output.push_str(&format!("{}\n\n", "=".repeat(50)));

        let Some(resources) = self.analysis.results.discovery_report() else {
            output.push_str("No resource discovery results available.\n");
            output.push_str(&format!("{}\n", "=".repeat(50)));
            return output;
        };

        let total = resources.total_resources;
        output.push_str(&format!("Total Connected Resources: {}\n\n", total));

        if total == 0 {
            output.push_str("No connected resources found.\n");
            output.push_str(&format!("{}\n", "=".repeat(50)));
            return output;
        }

        output.push_str("Resource Types:\n");
        for (resource_type, entries) in &resources.resources_by_type {
            output.push_str(&format!("   {}: {}\n", resource_type, entries.len()));
        }
        output.push('\n');

        let mut access_methods: std::collections::BTreeMap<String, usize> = Default::default();
        let mut connection_types: std::collections::BTreeMap<String, usize> = Default::default();
        for entries in resources.resources_by_type.values() {
            for resource in entries {
                *access_methods.entry(resource.access_method.to_string()).or_insert(0) += 1;
                *connection_types.entry(resource.connection_type.to_string()).or_insert(0) += 1;
            }
        }

        if !access_methods.is_empty() {
            output.push_str("Access Methods:\n");
            for (method, count) in &access_methods {
                let percentage = (*count as f64 / total as f64) * 100.0;
                output.push_str(&format!(
                    "   {}: {} ({:.1}%)\n",
                    report_formatter::format_connection_type(method),
                    count,
                    percentage,
                ));
            }
            output.push('\n');
        }

        if !connection_types.is_empty() {
            output.push_str("Connection Types:\n");
            for (connection_type, count) in &connection_types {
                let percentage = (*count as f64 / total as f64) * 100.0;
                output.push_str(&format!("   {}: {} ({:.1}%)\n", connection_type, count, percentage));
            }
            output.push('\n');
        }

        let scores: Vec<u32> = resources.resources_by_type.values()
            .flatten()
            .map(|resource| resource.security_score)
            .collect();
        let high = scores.iter().filter(|score| **score >= 80).count();
        let medium = scores.iter().filter(|score| (60..80).contains(*score)).count();
        let low = scores.iter().filter(|score| **score < 60).count();

        output.push_str("Security Insights:\n");
        output.push_str(&format!(
            "   Average Score: {}\n",
            report_formatter::format_security_score(
                resources.security_summary.average_security_score.round() as u32,
            ),
        ));
        output.push_str(&format!(
            "   High Security (80+): {}\n",
            report_formatter::format_resource_count(high, total),
        ));
        output.push_str(&format!(
            "   Medium Security (60-79): {}\n",
            report_formatter::format_resource_count(medium, total),
        ));
        output.push_str(&format!(
            "   Low Security (<60): {}\n",
            report_formatter::format_resource_count(low, total),
        ));

        output.push_str(&format!("\n{}\n", "=".repeat(50)));
        output
    }

    fn collect_recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();

        if let Some(network) = self.analysis.results.network_report() {
            recommendations.extend(network.summary.recommendations.iter().cloned());
        }
        if let Some(resources) = self.analysis.results.discovery_report() {
            recommendations.extend(resources.security_summary.recommendations.iter().cloned());
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use crate::enums::hub_type::HubType;
    use crate::structs::analysis_bundle::AnalysisBundle;
    use crate::structs::discovery_report::DiscoveryReport;
    use crate::structs::progress_summary::ProgressSummary;
    use crate::structs::security_summary::SecuritySummary;
    use crate::structs::stage_outcome::StageOutcome;
    use super::*;

    fn analysis() -> ConnectivityAnalysis {
        let discovery = DiscoveryReport {
            total_resources: 3,
            security_summary: SecuritySummary {
                total_resources: 3,
                public_accessible: 1,
                private_endpoint_protected: 2,
                average_security_score: 73.3,
                recommendations: vec![
                    "Consider disabling public access for 1 resources".to_string(),
                ],
            },
            ..Default::default()
        };

        ConnectivityAnalysis {
            hub_type: HubType::AzureMl,
            workspace_name: "ws1".to_string(),
            results: AnalysisBundle {
                connected_resources: Some(StageOutcome::Complete(discovery)),
                report_location: Some("reports/ws1_connectivity_20260101_000000.md".to_string()),
                ..Default::default()
            },
            summary: ProgressSummary {
                total_duration_secs: 12.5,
                total_steps: 6,
                completed_steps: 6,
                successful_steps: 5,
                failed_steps: 1,
                step_details: Vec::new(),
            },
        }
    }

    #[test]
    fn cli_summary_covers_resources_steps_and_report_paths() {
        let analysis = analysis();
        let summary = SummaryGenerator::new(&analysis).generate_cli_summary();

        assert!(summary.contains("📍 Workspace: ws1"));
        assert!(summary.contains("Total: 3"));
        assert!(summary.contains("Public Accessible: 1/3 (33.3%)"));
        assert!(summary.contains("Steps Completed: 5/6"));
        assert!(summary.contains("Failed Steps: 1"));
        assert!(summary.contains("ws1_connectivity_20260101_000000.json"));
        assert!(summary.contains("Consider disabling public access"));
    }

    #[test]
    fn resource_summary_breaks_down_access_methods_and_scores() {
        let mut analysis = analysis();
        if let Some(StageOutcome::Complete(report)) = analysis.results.connected_resources.as_mut() {
            report.total_resources = 2;
            report.security_summary.total_resources = 2;
            report.resources_by_type.insert(
                "storageAccounts".to_string(),
                vec![
                    crate::structs::resource_summary::ResourceSummary {
                        name: "st1".to_string(),
                        resource_group: "rg".to_string(),
                        connection_type: crate::enums::connection_type::ConnectionType::Default,
                        access_method: crate::enums::access_method::AccessMethod::Public,
                        public_access: true,
                        security_score: 30,
                        private_endpoints: 0,
                    },
                    crate::structs::resource_summary::ResourceSummary {
                        name: "st2".to_string(),
                        resource_group: "rg".to_string(),
                        connection_type: crate::enums::connection_type::ConnectionType::UserDefined,
                        access_method: crate::enums::access_method::AccessMethod::PrivateEndpoint,
                        public_access: false,
                        security_score: 90,
                        private_endpoints: 1,
                    },
                ],
            );
        }

        let summary = SummaryGenerator::new(&analysis).generate_resource_summary();
        assert!(summary.contains("Total Connected Resources: 2"));
        assert!(summary.contains("storageAccounts: 2"));
        assert!(summary.contains("🔒 private-endpoint: 1 (50.0%)"));
        assert!(summary.contains("🌐 public: 1 (50.0%)"));
        assert!(summary.contains("High Security (80+): 1/2 (50.0%)"));
        assert!(summary.contains("Low Security (<60): 1/2 (50.0%)"));
    }

    #[test]
    fn security_summary_reports_posture_lines() {
        let analysis = analysis();
        let summary = SummaryGenerator::new(&analysis).generate_security_summary();

        assert!(summary.contains("⚠️  Public network access enabled"));
        assert!(summary.contains("⚠️  1 resources with public access"));
        assert!(summary.contains("✅ 2 resources protected with private endpoints"));
        assert!(summary.contains("Priority Actions:"));
    }
}
