use std::fs;
use std::path::{Path, PathBuf};
use chrono::Utc;
use uuid::Uuid;
use crate::config::constants::{REPORT_TIMESTAMP_FORMAT, REPORT_VERSION};
use crate::enums::hub_type::HubType;
use crate::enums::network_type::NetworkType;
use crate::errors::{MlConnectError, MlConnectResult};
use crate::helpers::report_formatter;
use crate::structs::connectivity_analysis::ConnectivityAnalysis;
use crate::structs::discovery_report::DiscoveryReport;
use crate::structs::network_report::NetworkReport;
use crate::structs::report_section::ReportSection;

/// Renders the merged analysis into a Markdown document with a Mermaid
/// connectivity diagram, and persists it together with a JSON sibling
/// carrying the raw structured data.
pub struct MarkdownReportGenerator {
    analysis: ConnectivityAnalysis,
    sections: Vec<ReportSection>,
    run_id: Uuid,
}

impl MarkdownReportGenerator {
    pub fn new(analysis: ConnectivityAnalysis) -> Self {
        Self {
            analysis,
            sections: Vec::new(),
            run_id: Uuid::new_v4(),
        }
    }

    pub fn generate(&mut self) -> String {
        self.build_report_structure();
        self.render_markdown()
    }

    /// Write the report under `reports_dir` as
    /// `{workspace}_connectivity_{timestamp}.md` plus a `.json` sibling.
    /// Timestamped names keep repeated runs from overwriting each other.
    pub fn save_to_dir(&mut self, reports_dir: &Path) -> MlConnectResult<PathBuf> {
        let timestamp = Utc::now().format(REPORT_TIMESTAMP_FORMAT);
        let basename = format!("{}_connectivity_{}", self.analysis.workspace_name, timestamp);
        let report_path = reports_dir.join(format!("{}.md", basename));
        let json_path = reports_dir.join(format!("{}.json", basename));

        fs::create_dir_all(reports_dir).map_err(|e| {
            MlConnectError::report_error(&reports_dir.display().to_string(), &e.to_string())
        })?;

        let content = self.generate();
        fs::write(&report_path, content).map_err(|e| {
            MlConnectError::report_error(&report_path.display().to_string(), &e.to_string())
        })?;

        let json_content = serde_json::to_string_pretty(&self.analysis)?;
        fs::write(&json_path, json_content).map_err(|e| {
            MlConnectError::report_error(&json_path.display().to_string(), &e.to_string())
        })?;

        Ok(report_path)
    }

    fn build_report_structure(&mut self) {
        self.sections.clear();

        let sections = vec![
            self.generate_executive_summary(),
            self.generate_network_section(),
            self.generate_resources_section(),
            self.generate_security_section(),
            self.generate_connectivity_diagram(),
            self.generate_recommendations(),
            self.generate_detailed_findings(),
        ];
        self.sections = sections;
    }

    fn network_report(&self) -> Option<&NetworkReport> {
        self.analysis.results.network_report()
    }

    fn discovery_report(&self) -> Option<&DiscoveryReport> {
        self.analysis.results.discovery_report()
    }

    fn generate_executive_summary(&self) -> ReportSection {
        let workspace = self.analysis.results.workspace.as_ref();
        let network = self.network_report();
        let resources = self.discovery_report();

        let network_type = network
            .map(|n| n.network_type.display_name().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let isolation_mode = network
            .and_then(|n| n.isolation_mode)
            .map(|mode| mode.to_string())
            .unwrap_or_else(|| "Not configured".to_string());
        let public_access = match network.map(|n| n.public_network_access) {
            Some(true) => "⚠️ Enabled",
            Some(false) => "✅ Disabled",
            None => "Unknown",
        };
        let average_score = resources
            .map(|r| r.security_summary.average_security_score)
            .unwrap_or(0.0);

        let content = format!(
            "\n## 📋 Executive Summary\n\n\
             **Workspace:** {}  \n\
             **Type:** {}  \n\
             **Location:** {}  \n\
             **Analysis Date:** {}\n\n\
             ### Key Findings\n\n\
             - **Network Type:** {}\n\
             - **Isolation Mode:** {}\n\
             - **Public Network Access:** {}\n\
             - **Total Connected Resources:** {}\n\
             - **Average Security Score:** {}/100\n\n\
             ### Quick Status\n\n\
             {}\n",
            self.analysis.workspace_name,
            self.analysis.hub_type.display_name(),
            workspace.map(|w| w.location.as_str()).unwrap_or("Unknown"),
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            network_type,
            isolation_mode,
            public_access,
            resources.map(|r| r.total_resources).unwrap_or(0),
            average_score,
            self.generate_status_badges(),
        );

        ReportSection::new("Executive Summary", content, 2)
    }

    fn generate_status_badges(&self) -> String {
        let mut badges = Vec::new();

        match self.network_report().map(|n| n.public_network_access) {
            Some(false) => badges.push("🛡️ **Private Network**".to_string()),
            _ => badges.push("⚠️ **Public Access Enabled**".to_string()),
        }

        if let Some(network) = self.network_report() {
            if network.private_endpoints.count > 0 {
                badges.push(format!("🔒 **{} Private Endpoints**", network.private_endpoints.count));
            }
        }

        let average_score = self.discovery_report()
            .map(|r| r.security_summary.average_security_score)
            .unwrap_or(0.0);
        if average_score >= 80.0 {
            badges.push("✅ **High Security**".to_string());
        } else if average_score >= 60.0 {
            badges.push("⚠️ **Medium Security**".to_string());
        } else {
            badges.push("❌ **Low Security**".to_string());
        }

        badges.join(" | ")
    }

    fn generate_network_section(&self) -> ReportSection {
        let mut content = format!(
            "\n### Network Configuration\n\n**Configuration Type:** {}\n\n",
            self.network_report()
                .map(|n| n.network_type.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
        );

        if let Some(network) = self.network_report() {
            match network.network_type {
                NetworkType::Managed => content.push_str(&self.managed_network_details(network)),
                NetworkType::Customer => content.push_str(&self.customer_network_details(network)),
                NetworkType::None => {}
            }

            if network.outbound_rules.count > 0 {
                content.push_str(&self.outbound_rules_summary(network));
            }
        }

        ReportSection::new("Network Configuration", content, 2)
    }

    fn managed_network_details(&self, network: &NetworkReport) -> String {
        let isolation = network.isolation_mode;
        let isolation_label = isolation
            .map(|mode| mode.to_string())
            .unwrap_or_else(|| "Not configured".to_string());

        let settings = report_formatter::format_table(
            &["Setting", "Value"],
            &[
                vec![
                    "Allow Internet Outbound".to_string(),
                    (isolation == Some(crate::enums::isolation_mode::IsolationMode::AllowInternetOutbound)).to_string(),
                ],
                vec![
                    "Allow Only Approved Outbound".to_string(),
                    (isolation == Some(crate::enums::isolation_mode::IsolationMode::AllowOnlyApprovedOutbound)).to_string(),
                ],
                vec![
                    "Disabled".to_string(),
                    (isolation == Some(crate::enums::isolation_mode::IsolationMode::Disabled)).to_string(),
                ],
            ],
        );

        format!(
            "#### Managed Virtual Network Details\n\n\
             - **Isolation Mode:** {}\n\
             - **Public Network Access:** {}\n\n\
             ##### Network Isolation Settings\n\n{}\n",
            isolation_label, network.public_network_access, settings,
        )
    }

    fn customer_network_details(&self, network: &NetworkReport) -> String {
        let (nsg_count, rt_count) = network.vnet_details.as_ref()
            .map(|v| (v.network_security_groups.len(), v.route_tables.len()))
            .unwrap_or((0, 0));

        let mut content = format!(
            "#### Customer-Managed Virtual Network Details\n\n\
             - **VNet Configuration:** Customer-managed networking\n\
             - **Network Security Groups:** {}\n\
             - **Route Tables:** {}\n\n\
             ##### Network Security Summary\n\n",
            nsg_count, rt_count,
        );

        match network.vnet_details.as_ref().filter(|v| !v.network_security_groups.is_empty()) {
            Some(vnet) => {
                let rows: Vec<Vec<String>> = vnet.network_security_groups.iter()
                    .map(|nsg| {
                        let risk = if nsg.rules_summary.high_risk_rules.is_empty() { "Low" } else { "High" };
                        vec![
                            nsg.name.clone(),
                            nsg.rules_summary.allow_rules.to_string(),
                            nsg.rules_summary.deny_rules.to_string(),
                            risk.to_string(),
                        ]
                    })
                    .collect();
                content.push_str(&report_formatter::format_table(
                    &["NSG Name", "Allow Rules", "Deny Rules", "Risk Level"],
                    &rows,
                ));
            }
            None => content.push_str("No Network Security Groups found.\n"),
        }

        content
    }

    fn outbound_rules_summary(&self, network: &NetworkReport) -> String {
        let rules = &network.outbound_rules.rules;
        let buckets = [
            ("Fqdn", rules.fqdn.len()),
            ("Service Tag", rules.service_tag.len()),
            ("Private Endpoint", rules.private_endpoint.len()),
            ("Required", rules.required.len()),
            ("Other", rules.other.len()),
        ];

        let rows: Vec<Vec<String>> = buckets.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| vec![label.to_string(), count.to_string(), "Active".to_string()])
            .collect();

        format!(
            "\n#### Outbound Rules Summary\n\n{}\n",
            report_formatter::format_table(&["Type", "Count", "Status"], &rows),
        )
    }

    fn generate_resources_section(&self) -> ReportSection {
        let mut content = String::from("\n### Connected Resources Overview\n\n");

        if let Some(report) = self.discovery_report() {
            if !report.resources_by_type.is_empty() {
                let rows: Vec<Vec<String>> = report.resources_by_type.iter()
                    .map(|(resource_type, resources)| {
                        let avg: f64 = if resources.is_empty() {
                            0.0
                        } else {
                            resources.iter().map(|r| r.security_score as f64).sum::<f64>()
                                / resources.len() as f64
                        };
                        vec![
                            resource_type.clone(),
                            resources.len().to_string(),
                            format!("{:.1}/100", avg),
                        ]
                    })
                    .collect();
                content.push_str(&report_formatter::format_table(
                    &["Resource Type", "Count", "Avg Security Score"],
                    &rows,
                ));
            }

            for (resource_type, resources) in &report.resources_by_type {
                content.push_str(&format!("\n#### {}\n\n", resource_type));

                let rows: Vec<Vec<String>> = resources.iter()
                    .map(|resource| {
                        vec![
                            resource.name.clone(),
                            resource.resource_group.clone(),
                            resource.access_method.to_string(),
                            if resource.public_access { "⚠️ Yes".to_string() } else { "✅ No".to_string() },
                            format!("{}/100", resource.security_score),
                        ]
                    })
                    .collect();

                if rows.is_empty() {
                    content.push_str("No resources found.\n");
                } else {
                    content.push_str(&report_formatter::format_table(
                        &["Name", "Resource Group", "Access Method", "Public Access", "Security Score"],
                        &rows,
                    ));
                }
            }
        }

        ReportSection::new("Connected Resources", content, 2)
    }

    fn generate_security_section(&self) -> ReportSection {
        let summary = self.discovery_report().map(|r| &r.security_summary);
        let total = summary.map(|s| s.total_resources).unwrap_or(0);

        let mut content = format!(
            "\n### Security Analysis\n\n#### Overall Security Posture\n\n\
             - **Network Security Level:** {}\n\
             - **Resource Security Score:** {}/100\n\
             - **Resources with Public Access:** {}/{}\n\
             - **Resources with Private Endpoints:** {}/{}\n\n\
             #### Security Findings\n\n",
            self.network_security_level(),
            summary.map(|s| s.average_security_score).unwrap_or(0.0),
            summary.map(|s| s.public_accessible).unwrap_or(0),
            total,
            summary.map(|s| s.private_endpoint_protected).unwrap_or(0),
            total,
        );

        for finding in self.security_findings() {
            content.push_str(&format!("- {}\n", finding));
        }

        ReportSection::new("Security Analysis", content, 2)
    }

    fn network_security_level(&self) -> String {
        use crate::enums::isolation_mode::IsolationMode;

        match self.network_report() {
            Some(network) if !network.public_network_access => {
                if network.isolation_mode == Some(IsolationMode::AllowOnlyApprovedOutbound) {
                    "🛡️ **High** - Private access with strict outbound control".to_string()
                } else {
                    "🔒 **Medium-High** - Private access only".to_string()
                }
            }
            _ => "⚠️ **Low** - Public network access enabled".to_string(),
        }
    }

    fn security_findings(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.network_report().map(|n| n.public_network_access).unwrap_or(false) {
            findings.push(
                "⚠️ **Public network access is enabled** - Consider disabling for enhanced security"
                    .to_string(),
            );
        }

        if let Some(summary) = self.discovery_report().map(|r| &r.security_summary) {
            if summary.public_accessible > 0 {
                findings.push(format!(
                    "⚠️ **{} resources have public access enabled**",
                    summary.public_accessible
                ));
            }
            if summary.private_endpoint_protected > 0 {
                findings.push(format!(
                    "✅ **{} resources are protected with private endpoints**",
                    summary.private_endpoint_protected
                ));
            }
        }

        findings
    }

    fn generate_connectivity_diagram(&self) -> ReportSection {
        let content = format!(
            "\n### Network Connectivity Diagram\n\n```mermaid\n{}\n```\n\n\
             This diagram shows the network connectivity between your workspace and connected resources.\n",
            self.build_mermaid_diagram(),
        );

        ReportSection::new("Connectivity Visualization", content, 2)
    }

    fn build_mermaid_diagram(&self) -> String {
        let mut diagram = String::from("graph TB\n    subgraph \"Azure Subscription\"\n        subgraph \"Resource Group\"\n");

        let workspace_node = match self.analysis.hub_type {
            HubType::AiFoundry => {
                diagram.push_str(&format!(
                    "            Hub[\"{}<br/>(AI Foundry Hub)\"]\n",
                    self.analysis.workspace_name
                ));
                "Hub"
            }
            HubType::AzureMl => {
                diagram.push_str(&format!(
                    "            WS[\"{}<br/>(ML Workspace)\"]\n",
                    self.analysis.workspace_name
                ));
                "WS"
            }
        };

        match self.network_report().map(|n| n.network_type) {
            Some(NetworkType::Managed) => {
                diagram.push_str("            ManagedVNet[\"Managed VNet<br/>(Microsoft-managed)\"]\n");
                diagram.push_str(&format!("            {} --> ManagedVNet\n", workspace_node));
            }
            Some(NetworkType::Customer) => {
                diagram.push_str("            CustomerVNet[\"Customer VNet<br/>(Customer-managed)\"]\n");
                diagram.push_str(&format!("            {} --> CustomerVNet\n", workspace_node));
            }
            _ => {}
        }

        if let Some(report) = self.discovery_report() {
            for (resource_type, resources) in &report.resources_by_type {
                for (index, resource) in resources.iter().enumerate() {
                    let node_id = format!("{}{}", resource_type, index);

                    if resource.access_method == crate::enums::access_method::AccessMethod::PrivateEndpoint {
                        diagram.push_str(&format!(
                            "            {}[\"{}<br/>({})<br/>🔒 Private Endpoint\"]\n",
                            node_id, resource.name, resource_type
                        ));
                    } else if resource.public_access {
                        diagram.push_str(&format!(
                            "            {}[\"{}<br/>({})<br/>⚠️ Public Access\"]\n",
                            node_id, resource.name, resource_type
                        ));
                    } else {
                        diagram.push_str(&format!(
                            "            {}[\"{}<br/>({})\"]\n",
                            node_id, resource.name, resource_type
                        ));
                    }

                    // Default connections render dotted, the rest solid
                    if resource.connection_type == crate::enums::connection_type::ConnectionType::Default {
                        diagram.push_str(&format!("            {} -.-> {}\n", workspace_node, node_id));
                    } else {
                        diagram.push_str(&format!("            {} --> {}\n", workspace_node, node_id));
                    }
                }
            }
        }

        diagram.push_str(
            "        end\n    end\n    \n    \
             classDef secure fill:#90EE90,stroke:#006400,stroke-width:2px\n    \
             classDef warning fill:#FFE4B5,stroke:#FF8C00,stroke-width:2px\n    \
             classDef default fill:#E6E6FA,stroke:#4B0082,stroke-width:1px",
        );

        diagram
    }

    fn generate_recommendations(&self) -> ReportSection {
        let mut all_recommendations = Vec::new();

        if let Some(network) = self.network_report() {
            all_recommendations.extend(network.summary.recommendations.iter().cloned());
        }
        if let Some(report) = self.discovery_report() {
            all_recommendations.extend(report.security_summary.recommendations.iter().cloned());
        }

        let mut content = String::from(
            "\n### Recommendations\n\n\
             Based on the analysis, here are our recommendations to improve your security posture:\n\n",
        );

        if all_recommendations.is_empty() {
            content.push_str("✅ No critical security recommendations at this time.\n");
        } else {
            for (index, recommendation) in all_recommendations.iter().enumerate() {
                content.push_str(&format!("{}. {}\n", index + 1, recommendation));
            }
        }

        content.push_str(
            "\n#### Best Practices\n\n\
             1. **Use Private Endpoints**: Configure private endpoints for all critical resources\n\
             2. **Disable Public Access**: Turn off public network access where possible\n\
             3. **Implement Network Isolation**: Use managed VNet with approved outbound rules\n\
             4. **Regular Security Reviews**: Periodically review and update network configurations\n\
             5. **Monitor Access Logs**: Enable diagnostic logging for all resources\n",
        );

        ReportSection::new("Recommendations", content, 2)
    }

    fn generate_detailed_findings(&self) -> ReportSection {
        let raw = serde_json::to_string_pretty(&self.analysis)
            .unwrap_or_else(|e| format!("Failed to serialize analysis results: {}", e));

        let content = format!(
            "\n### Detailed Analysis Results\n\n\
             <details>\n<summary>Click to expand detailed JSON results</summary>\n\n\
             ```json\n{}\n```\n\n</details>\n",
            raw,
        );

        ReportSection::new("Detailed Findings", content, 2)
    }

    fn render_markdown(&self) -> String {
        let mut output = format!(
            "# Azure {} Connectivity Analysis Report\n\n",
            self.analysis.hub_type.display_name(),
        );

        for section in &self.sections {
            output.push_str(&Self::render_section(section));
        }

        output.push_str(&format!(
            "\n---\n\n*Report {} (v{}) generated on {}*\n",
            self.run_id,
            REPORT_VERSION,
            Utc::now().format("%Y-%m-%d at %H:%M:%S"),
        ));

        output
    }

    fn render_section(section: &ReportSection) -> String {
        let mut output = section.content.clone();
        output.push('\n');

        for subsection in &section.subsections {
            output.push_str(&Self::render_section(subsection));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use crate::enums::access_method::AccessMethod;
    use crate::enums::connection_type::ConnectionType;
    use crate::enums::isolation_mode::IsolationMode;
    use crate::structs::analysis_bundle::AnalysisBundle;
    use crate::structs::discovery_report::DiscoveryReport;
    use crate::structs::network_report::{NetworkReport, OutboundRuleSection, PrivateEndpointSection};
    use crate::structs::network_summary::{ConnectivitySummary, InboundConnectivity, NetworkSummary};
    use crate::structs::progress_summary::ProgressSummary;
    use crate::structs::resource_summary::ResourceSummary;
    use crate::structs::security_summary::SecuritySummary;
    use crate::structs::stage_outcome::StageOutcome;
    use crate::structs::workspace_summary::WorkspaceSummary;
    use super::*;

    fn sample_analysis() -> ConnectivityAnalysis {
        let network = NetworkReport {
            network_type: NetworkType::Managed,
            isolation_mode: Some(IsolationMode::AllowOnlyApprovedOutbound),
            public_network_access: false,
            private_endpoints: PrivateEndpointSection { count: 1, endpoints: vec![Default::default()] },
            outbound_rules: OutboundRuleSection::default(),
            virtual_network: None,
            subnets: Vec::new(),
            summary: NetworkSummary {
                configuration_type: NetworkType::Managed,
                security_level: "High - Private with approved outbound only".to_string(),
                connectivity: ConnectivitySummary {
                    inbound: InboundConnectivity {
                        public_access: false,
                        private_endpoints: 1,
                        service_endpoints: 0,
                    },
                    outbound: Default::default(),
                },
                key_findings: vec!["✅ Public network access is disabled".to_string()],
                recommendations: vec![],
            },
            vnet_details: None,
        };

        let mut discovery = DiscoveryReport {
            total_resources: 2,
            security_summary: SecuritySummary {
                total_resources: 2,
                public_accessible: 1,
                private_endpoint_protected: 1,
                average_security_score: 65.0,
                recommendations: vec!["Consider disabling public access for 1 resources".to_string()],
            },
            ..Default::default()
        };
        discovery.resources_by_type.insert(
            "storageAccounts".to_string(),
            vec![ResourceSummary {
                name: "wsstorage".to_string(),
                resource_group: "rg".to_string(),
                connection_type: ConnectionType::Default,
                access_method: AccessMethod::Public,
                public_access: true,
                security_score: 30,
                private_endpoints: 0,
            }],
        );
        discovery.resources_by_type.insert(
            "vaults".to_string(),
            vec![ResourceSummary {
                name: "wskv".to_string(),
                resource_group: "rg".to_string(),
                connection_type: ConnectionType::UserDefined,
                access_method: AccessMethod::PrivateEndpoint,
                public_access: false,
                security_score: 100,
                private_endpoints: 1,
            }],
        );

        ConnectivityAnalysis {
            hub_type: HubType::AzureMl,
            workspace_name: "ws1".to_string(),
            results: AnalysisBundle {
                workspace: Some(WorkspaceSummary {
                    name: "ws1".to_string(),
                    location: "westeurope".to_string(),
                    network_mode: "managed".to_string(),
                    isolation_mode: Some(IsolationMode::AllowOnlyApprovedOutbound),
                    hub_type: HubType::AzureMl,
                }),
                network: Some(StageOutcome::Complete(network)),
                connected_resources: Some(StageOutcome::Complete(discovery)),
                report_location: None,
            },
            summary: ProgressSummary::default(),
        }
    }

    #[test]
    fn report_contains_all_sections() {
        let mut generator = MarkdownReportGenerator::new(sample_analysis());
        let report = generator.generate();

        assert!(report.starts_with("# Azure Azure ML Workspace Connectivity Analysis Report"));
        for heading in [
            "Executive Summary",
            "Network Configuration",
            "Connected Resources Overview",
            "Security Analysis",
            "Network Connectivity Diagram",
            "Recommendations",
            "Detailed Analysis Results",
        ] {
            assert!(report.contains(heading), "missing section: {}", heading);
        }
    }

    #[test]
    fn diagram_nodes_reflect_topology_and_access() {
        let mut generator = MarkdownReportGenerator::new(sample_analysis());
        let report = generator.generate();

        assert!(report.contains("WS[\"ws1<br/>(ML Workspace)\"]"));
        assert!(report.contains("WS --> ManagedVNet"));
        // Default connection renders dotted, user-defined solid
        assert!(report.contains("WS -.-> storageAccounts0"));
        assert!(report.contains("WS --> vaults0"));
        assert!(report.contains("⚠️ Public Access"));
        assert!(report.contains("🔒 Private Endpoint"));
    }

    #[test]
    fn security_section_reflects_isolation_tier() {
        let mut generator = MarkdownReportGenerator::new(sample_analysis());
        let report = generator.generate();
        assert!(report.contains("🛡️ **High** - Private access with strict outbound control"));
        assert!(report.contains("⚠️ **1 resources have public access enabled**"));
    }

    #[test]
    fn save_writes_markdown_and_json_siblings() {
        let temp = tempfile::tempdir().unwrap();
        let mut generator = MarkdownReportGenerator::new(sample_analysis());

        let report_path = generator.save_to_dir(temp.path()).unwrap();
        assert!(report_path.exists());
        let filename = report_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(filename.starts_with("ws1_connectivity_"));
        assert!(filename.ends_with(".md"));

        let json_path = report_path.with_extension("json");
        assert!(json_path.exists());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(raw["workspace_name"], "ws1");
        assert_eq!(raw["results"]["network"]["network_type"], "managed");
    }

    #[test]
    fn missing_stages_render_placeholders() {
        let analysis = ConnectivityAnalysis {
            hub_type: HubType::AiFoundry,
            workspace_name: "hub1".to_string(),
            results: AnalysisBundle::default(),
            summary: ProgressSummary::default(),
        };
        let mut generator = MarkdownReportGenerator::new(analysis);
        let report = generator.generate();

        assert!(report.contains("**Network Type:** Unknown"));
        assert!(report.contains("Hub[\"hub1<br/>(AI Foundry Hub)\"]"));
        assert!(report.contains("❌ **Low Security**"));
    }
}
