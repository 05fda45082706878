use std::collections::BTreeSet;
use serde_json::Value;
use crate::config::constants::RESOURCE_QUERY_TIMEOUT_SECS;
use crate::helpers::network_utils;
use crate::services::azure_cli::AzureCli;
use crate::structs::nsg_details::{HighRiskRule, NsgDetails, NsgRule, NsgRulesSummary};
use crate::structs::route_table_details::{RouteEntry, RouteTableDetails};
use crate::structs::subnet_details::SubnetDetails;
use crate::structs::vnet_details::VnetDetails;
use crate::structs::vnet_report::{VnetReport, VnetSummary};

/// Resolves the customer-managed VNet topology behind a workspace:
/// private endpoints to subnets, subnets to VNets, and per-subnet NSGs and
/// route tables. Every lookup is best-effort; whatever resolves is kept.
pub struct VnetAnalyzer {
    azure_cli: AzureCli,
}

impl VnetAnalyzer {
    pub fn new(azure_cli: AzureCli) -> Self {
        Self { azure_cli }
    }

    pub async fn analyze_workspace_vnet(&self, workspace_info: &Value) -> VnetReport {
        let mut report = VnetReport::default();

        let subnet_ids = self.extract_subnet_ids(workspace_info).await;

        for subnet_id in &subnet_ids {
            if let Some(subnet_info) = self.subnet_info(subnet_id).await {
                report.subnets.push(subnet_info);

                if let Some(vnet) = self.vnet_details(subnet_id).await {
                    if !report.vnets.iter().any(|existing| existing.id == vnet.id) {
                        report.vnets.push(vnet);
                    }
                }
            }
        }

        report.network_security_groups = self.analyze_network_security_groups(&report.subnets).await;
        report.route_tables = self.analyze_route_tables(&report.subnets).await;
        report.analysis_summary = Self::build_summary(&report);

        report
    }

    /// Subnet ids reached through the workspace's private endpoints.
    async fn extract_subnet_ids(&self, workspace_info: &Value) -> Vec<String> {
        let mut subnet_ids = BTreeSet::new();

        let connections = workspace_info["private_endpoint_connections"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        for connection in &connections {
            let pe_id = connection["private_endpoint"]["id"].as_str().unwrap_or("");
            if pe_id.is_empty() {
                continue;
            }

            if let Some(details) = self.private_endpoint_details(pe_id).await {
                if let Some(subnet_id) = details["subnet"]["id"].as_str() {
                    subnet_ids.insert(subnet_id.to_string());
                }
            }
        }

        subnet_ids.into_iter().collect()
    }

    async fn private_endpoint_details(&self, pe_id: &str) -> Option<Value> {
        let parts: Vec<&str> = pe_id.split('/').collect();
        if parts.len() < 9 {
            return None;
        }

        let result = self.azure_cli
            .run_command(
                &[
                    "network", "private-endpoint", "show",
                    "--resource-group", parts[4],
                    "--name", parts[8],
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        if result.is_none() {
            log::debug!("Failed to get private endpoint details for {}", pe_id);
        }
        result
    }

    async fn subnet_info(&self, subnet_id: &str) -> Option<SubnetDetails> {
        let parts: Vec<&str> = subnet_id.split('/').collect();
        if parts.len() < 11 {
            return None;
        }
        let (subnet_rg, vnet_name, subnet_name) = (parts[4], parts[8], parts[10]);

        let subnet_data = self.azure_cli
            .run_command(
                &[
                    "network", "vnet", "subnet", "show",
                    "--resource-group", subnet_rg,
                    "--vnet-name", vnet_name,
                    "--name", subnet_name,
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(subnet_data) = subnet_data else {
            log::debug!("Failed to get subnet info for {}", subnet_id);
            return None;
        };

        Some(SubnetDetails {
            id: subnet_data["id"].as_str().map(str::to_string),
            name: subnet_data["name"].as_str().map(str::to_string),
            address_prefix: subnet_data["addressPrefix"].as_str().map(str::to_string),
            resource_group: subnet_rg.to_string(),
            vnet_name: vnet_name.to_string(),
            network_security_group: non_null(subnet_data.get("networkSecurityGroup")),
            route_table: non_null(subnet_data.get("routeTable")),
            service_endpoints: subnet_data["serviceEndpoints"].as_array().cloned().unwrap_or_default(),
            private_endpoint_network_policies: subnet_data["privateEndpointNetworkPolicies"]
                .as_str()
                .map(str::to_string),
            private_link_service_network_policies: subnet_data["privateLinkServiceNetworkPolicies"]
                .as_str()
                .map(str::to_string),
        })
    }

    async fn vnet_details(&self, subnet_id: &str) -> Option<VnetDetails> {
        let parts: Vec<&str> = subnet_id.split('/').collect();
        if parts.len() < 9 {
            return None;
        }
        let (vnet_rg, vnet_name) = (parts[4], parts[8]);

        let vnet_data = self.azure_cli
            .run_command(
                &["network", "vnet", "show", "--resource-group", vnet_rg, "--name", vnet_name],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(vnet_data) = vnet_data else {
            log::debug!("Failed to get VNet details for {}", subnet_id);
            return None;
        };

        Some(VnetDetails {
            id: vnet_data["id"].as_str().unwrap_or_default().to_string(),
            name: vnet_data["name"].as_str().map(str::to_string),
            resource_group: vnet_rg.to_string(),
            location: vnet_data["location"].as_str().map(str::to_string),
            address_space: string_list(&vnet_data["addressSpace"]["addressPrefixes"]),
            dns_servers: string_list(&vnet_data["dhcpOptions"]["dnsServers"]),
            subnets_count: vnet_data["subnets"].as_array().map(Vec::len).unwrap_or(0),
            enable_ddos_protection: vnet_data["enableDdosProtection"].as_bool().unwrap_or(false),
            enable_vm_protection: vnet_data["enableVmProtection"].as_bool().unwrap_or(false),
        })
    }

    /// NSGs attached to the resolved subnets, processed once per NSG id.
    async fn analyze_network_security_groups(&self, subnets: &[SubnetDetails]) -> Vec<NsgDetails> {
        let mut nsgs = Vec::new();
        let mut processed = BTreeSet::new();

        for subnet in subnets {
            let Some(nsg_id) = subnet.network_security_group.as_ref()
                .and_then(|nsg| nsg["id"].as_str())
            else {
                continue;
            };

            if !processed.insert(nsg_id.to_string()) {
                continue;
            }

            if let Some(details) = self.nsg_details(nsg_id).await {
                nsgs.push(details);
            }
        }

        nsgs
    }

    async fn nsg_details(&self, nsg_id: &str) -> Option<NsgDetails> {
        let parts: Vec<&str> = nsg_id.split('/').collect();
        if parts.len() < 9 {
            return None;
        }
        let (nsg_rg, nsg_name) = (parts[4], parts[8]);

        let nsg_data = self.azure_cli
            .run_command(
                &["network", "nsg", "show", "--resource-group", nsg_rg, "--name", nsg_name],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(nsg_data) = nsg_data else {
            log::debug!("Failed to get NSG details for {}", nsg_id);
            return None;
        };

        let security_rules = nsg_data["securityRules"].as_array().cloned().unwrap_or_default();

        Some(NsgDetails {
            id: nsg_data["id"].as_str().unwrap_or_default().to_string(),
            name: nsg_data["name"].as_str().unwrap_or_default().to_string(),
            resource_group: nsg_rg.to_string(),
            location: nsg_data["location"].as_str().map(str::to_string),
            security_rules: Self::format_nsg_rules(&security_rules),
            default_security_rules: Self::format_nsg_rules(
                &nsg_data["defaultSecurityRules"].as_array().cloned().unwrap_or_default(),
            ),
            rules_summary: Self::analyze_nsg_rules(&security_rules),
        })
    }

    fn format_nsg_rules(rules: &[Value]) -> Vec<NsgRule> {
        let mut formatted: Vec<NsgRule> = rules.iter()
            .map(|rule| NsgRule {
                name: rule["name"].as_str().map(str::to_string),
                priority: rule["priority"].as_i64().unwrap_or(65535),
                direction: rule["direction"].as_str().map(str::to_string),
                access: rule["access"].as_str().map(str::to_string),
                protocol: rule["protocol"].as_str().map(str::to_string),
                source: format!(
                    "{}:{}",
                    rule["sourceAddressPrefix"].as_str().unwrap_or("*"),
                    rule["sourcePortRange"].as_str().unwrap_or("*"),
                ),
                destination: format!(
                    "{}:{}",
                    rule["destinationAddressPrefix"].as_str().unwrap_or("*"),
                    rule["destinationPortRange"].as_str().unwrap_or("*"),
                ),
                description: rule["description"].as_str().unwrap_or_default().to_string(),
            })
            .collect();

        formatted.sort_by_key(|rule| rule.priority);
        formatted
    }

    /// A rule is high-risk iff it allows inbound traffic from the whole
    /// internet ("*", "0.0.0.0/0" or "Internet").
    pub fn analyze_nsg_rules(rules: &[Value]) -> NsgRulesSummary {
        let mut summary = NsgRulesSummary {
            total_rules: rules.len(),
            ..Default::default()
        };

        for rule in rules {
            let access = rule["access"].as_str().unwrap_or("").to_lowercase();
            let direction = rule["direction"].as_str().unwrap_or("").to_lowercase();

            match access.as_str() {
                "allow" => summary.allow_rules += 1,
                "deny" => summary.deny_rules += 1,
                _ => {}
            }

            match direction.as_str() {
                "inbound" => summary.inbound_rules += 1,
                "outbound" => summary.outbound_rules += 1,
                _ => {}
            }

            let source_prefix = rule["sourceAddressPrefix"].as_str().unwrap_or("");
            if access == "allow"
                && direction == "inbound"
                && matches!(source_prefix, "*" | "0.0.0.0/0" | "Internet")
            {
                let port_range = rule["destinationPortRange"].as_str().unwrap_or("*");
                summary.high_risk_rules.push(HighRiskRule {
                    name: rule["name"].as_str().map(str::to_string),
                    risk: "Open to Internet".to_string(),
                    port: rule["destinationPortRange"].as_str().map(str::to_string),
                });

                if port_range != "*" {
                    summary.open_ports.push(port_range.to_string());
                }
            }
        }

        summary
    }

    /// Route tables attached to the resolved subnets, processed once per id.
    async fn analyze_route_tables(&self, subnets: &[SubnetDetails]) -> Vec<RouteTableDetails> {
        let mut route_tables = Vec::new();
        let mut processed = BTreeSet::new();

        for subnet in subnets {
            let Some(rt_id) = subnet.route_table.as_ref().and_then(|rt| rt["id"].as_str()) else {
                continue;
            };

            if !processed.insert(rt_id.to_string()) {
                continue;
            }

            if let Some(details) = self.route_table_details(rt_id).await {
                route_tables.push(details);
            }
        }

        route_tables
    }

    async fn route_table_details(&self, rt_id: &str) -> Option<RouteTableDetails> {
        let parts: Vec<&str> = rt_id.split('/').collect();
        if parts.len() < 9 {
            return None;
        }
        let (rt_rg, rt_name) = (parts[4], parts[8]);

        let rt_data = self.azure_cli
            .run_command(
                &["network", "route-table", "show", "--resource-group", rt_rg, "--name", rt_name],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(rt_data) = rt_data else {
            log::debug!("Failed to get route table details for {}", rt_id);
            return None;
        };

        let routes = rt_data["routes"].as_array().cloned().unwrap_or_default();

        Some(RouteTableDetails {
            id: rt_data["id"].as_str().unwrap_or_default().to_string(),
            name: rt_data["name"].as_str().unwrap_or_default().to_string(),
            resource_group: rt_rg.to_string(),
            location: rt_data["location"].as_str().map(str::to_string),
            routes: routes.iter()
                .map(|route| RouteEntry {
                    name: route["name"].as_str().map(str::to_string),
                    address_prefix: route["addressPrefix"].as_str().map(str::to_string),
                    next_hop_type: route["nextHopType"].as_str().map(str::to_string),
                    next_hop_ip_address: route["nextHopIpAddress"].as_str().map(str::to_string),
                    provisioning_state: route["provisioningState"].as_str().map(str::to_string),
                })
                .collect(),
            disable_bgp_route_propagation: rt_data["disableBgpRoutePropagation"]
                .as_bool()
                .unwrap_or(false),
        })
    }

    fn build_summary(report: &VnetReport) -> VnetSummary {
        let mut insights = Vec::new();
        let mut open_ports = Vec::new();
        let mut high_risk_count = 0;

        for nsg in &report.network_security_groups {
            let high_risk_rules = &nsg.rules_summary.high_risk_rules;
            high_risk_count += high_risk_rules.len();

            if !high_risk_rules.is_empty() {
                insights.push(format!(
                    "⚠️ NSG '{}' has {} high-risk rule(s)",
                    nsg.name,
                    high_risk_rules.len()
                ));
            }
            open_ports.extend(nsg.rules_summary.open_ports.iter().cloned());
        }

        if high_risk_count == 0 {
            insights.push("✅ No high-risk NSG rules detected".to_string());
        }

        if !open_ports.is_empty() {
            let exposure = network_utils::analyze_port_exposure(&open_ports);
            insights.push(format!("🔓 Port exposure: {}", exposure.risk_assessment));
        }

        let service_endpoint_count: usize = report.subnets.iter()
            .map(|subnet| subnet.service_endpoints.len())
            .sum();
        if service_endpoint_count > 0 {
            insights.push(format!("ℹ️ {} service endpoint(s) configured", service_endpoint_count));
        }

        let mut recommendations = Vec::new();

        let subnets_without_nsg = report.subnets.iter()
            .filter(|subnet| subnet.network_security_group.is_none())
            .count();
        if subnets_without_nsg > 0 {
            recommendations.push(format!(
                "Consider adding NSGs to {} subnet(s) without network security groups",
                subnets_without_nsg
            ));
        }

        for nsg in &report.network_security_groups {
            if !nsg.rules_summary.high_risk_rules.is_empty() {
                recommendations.push(format!("Review high-risk rules in NSG '{}'", nsg.name));
            }
        }

        for vnet in &report.vnets {
            if vnet.dns_servers.is_empty() {
                recommendations.push(format!(
                    "Consider configuring custom DNS servers for VNet '{}'",
                    vnet.name.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        VnetSummary {
            status: "completed".to_string(),
            error: None,
            vnets_analyzed: report.vnets.len(),
            subnets_analyzed: report.subnets.len(),
            nsgs_analyzed: report.network_security_groups.len(),
            route_tables_analyzed: report.route_tables.len(),
            security_insights: insights,
            recommendations,
        }
    }
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

fn string_list(value: &Value) -> Vec<String> {
    value.as_array()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
