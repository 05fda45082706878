use std::collections::BTreeMap;
use serde_json::Value;
use crate::config::constants::WORKSPACE_QUERY_TIMEOUT_SECS;
use crate::enums::isolation_mode::IsolationMode;
use crate::enums::network_type::NetworkType;
use crate::services::azure_cli::AzureCli;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::network_report::{CategorizedRules, NetworkReport, OutboundRuleSection, PrivateEndpointSection};
use crate::structs::network_summary::{ConnectivitySummary, InboundConnectivity, NetworkSummary};
use crate::structs::outbound_rule::OutboundRule;
use crate::structs::private_endpoint::PrivateEndpointInfo;

/// Mutable accumulator for one classification run, frozen into a
/// `NetworkReport` at the end.
#[derive(Debug, Default)]
struct NetworkState {
    network_type: Option<NetworkType>,
    isolation_mode: Option<IsolationMode>,
    public_network_access: bool,
    private_endpoints: Vec<PrivateEndpointInfo>,
    outbound_rules: Vec<OutboundRule>,
    virtual_network: Option<Value>,
    subnets: Vec<Value>,
}

/// Classifies the workspace network topology and inventories its
/// connectivity configuration.
pub struct NetworkAnalyzer {
    azure_cli: AzureCli,
    workspace_name: String,
    resource_group: String,
}

impl NetworkAnalyzer {
    pub fn new(azure_cli: AzureCli, workspace_name: &str, resource_group: &str) -> Self {
        Self {
            azure_cli,
            workspace_name: workspace_name.to_string(),
            resource_group: resource_group.to_string(),
        }
    }

    pub async fn analyze(&self) -> AnalysisResult<NetworkReport> {
        let workspace_info = match self.workspace_info().await {
            Some(info) => info,
            None => {
                return AnalysisResult::failure(
                    "Network analysis failed: unable to fetch workspace information",
                    "Unable to fetch workspace information",
                );
            }
        };

        let mut state = NetworkState::default();

        let (network_type, isolation_mode, public_access) = Self::classify(&workspace_info);
        state.network_type = Some(network_type);
        state.isolation_mode = isolation_mode;
        state.public_network_access = public_access;

        match network_type {
            NetworkType::Managed => self.collect_managed_rules(&mut state, &workspace_info),
            NetworkType::Customer => Self::collect_descriptor_endpoints(&mut state, &workspace_info),
            NetworkType::None => {}
        }

        self.collect_listed_endpoints(&mut state).await;
        self.collect_outbound_rule_list(&mut state).await;

        AnalysisResult::success(
            "Network analysis completed successfully",
            Self::format_report(state),
        )
    }

    /// Pure topology classification: a non-empty managed-network block wins,
    /// then private-endpoint connections, else no special configuration.
    pub fn classify(workspace_info: &Value) -> (NetworkType, Option<IsolationMode>, bool) {
        let managed_network = workspace_info["managed_network"].as_object();
        let has_managed_network = managed_network.map(|block| !block.is_empty()).unwrap_or(false);
        let has_private_endpoints = workspace_info["private_endpoint_connections"]
            .as_array()
            .map(|connections| !connections.is_empty())
            .unwrap_or(false);

        let (network_type, isolation_mode) = if has_managed_network {
            let isolation = workspace_info["managed_network"]["isolation_mode"]
                .as_str()
                .and_then(IsolationMode::parse);
            (NetworkType::Managed, isolation)
        } else if has_private_endpoints {
            (NetworkType::Customer, None)
        } else {
            (NetworkType::None, None)
        };

        let public_access = workspace_info["public_network_access"]
            .as_str()
            .unwrap_or("Enabled")
            == "Enabled";

        (network_type, isolation_mode, public_access)
    }

    async fn workspace_info(&self) -> Option<Value> {
        self.azure_cli
            .run_command(
                &[
                    "ml", "workspace", "show",
                    "--name", &self.workspace_name,
                    "--resource-group", &self.resource_group,
                ],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await
    }

    fn collect_managed_rules(&self, state: &mut NetworkState, workspace_info: &Value) {
        let rules = workspace_info["managed_network"]["outbound_rules"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        for rule in &rules {
            state.outbound_rules.push(Self::normalize_rule(rule));
        }
    }

    /// Private-endpoint connections embedded in the workspace descriptor.
    fn collect_descriptor_endpoints(state: &mut NetworkState, workspace_info: &Value) {
        let connections = workspace_info["private_endpoint_connections"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        for connection in &connections {
            let private_endpoint = &connection["private_endpoint"];
            if private_endpoint.as_object().map(|pe| !pe.is_empty()).unwrap_or(false) {
                state.private_endpoints.push(PrivateEndpointInfo {
                    id: private_endpoint["id"].as_str().map(str::to_string),
                    provisioning_state: connection["provisioning_state"].as_str().map(str::to_string),
                    connection_state: connection.get("private_link_service_connection_state").cloned(),
                    ..Default::default()
                });
            }
        }
    }

    /// Private endpoints listed in the resource group whose service id
    /// references this workspace, deduplicated by name.
    async fn collect_listed_endpoints(&self, state: &mut NetworkState) {
        let endpoints = self.azure_cli
            .run_command(
                &["network", "private-endpoint", "list", "--resource-group", &self.resource_group],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(Value::Array(endpoints)) = endpoints else {
            return;
        };

        let workspace_pattern = format!("/workspaces/{}", self.workspace_name).to_lowercase();

        for endpoint in &endpoints {
            let connections = endpoint["privateLinkServiceConnections"]
                .as_array()
                .cloned()
                .unwrap_or_default();

            for connection in &connections {
                let service_id = connection["privateLinkServiceId"].as_str().unwrap_or("");
                if !service_id.to_lowercase().contains(&workspace_pattern) {
                    continue;
                }

                let name = endpoint["name"].as_str().map(str::to_string);
                let already_captured = state.private_endpoints.iter()
                    .any(|pe| pe.name.is_some() && pe.name == name);
                if already_captured {
                    continue;
                }

                let network_interfaces = endpoint["networkInterfaces"]
                    .as_array()
                    .map(|nics| {
                        nics.iter()
                            .filter_map(|nic| nic["id"].as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();

                state.private_endpoints.push(PrivateEndpointInfo {
                    id: endpoint["id"].as_str().map(str::to_string),
                    name,
                    location: endpoint["location"].as_str().map(str::to_string),
                    subnet: endpoint["subnet"]["id"].as_str().map(str::to_string),
                    network_interfaces,
                    provisioning_state: endpoint["provisioningState"].as_str().map(str::to_string),
                    connection_state: connection.get("privateLinkServiceConnectionState").cloned(),
                });
            }
        }
    }

    /// Merge the outbound-rule list API results, deduplicating by rule name
    /// against rules already taken from the workspace descriptor.
    async fn collect_outbound_rule_list(&self, state: &mut NetworkState) {
        if state.network_type != Some(NetworkType::Managed) {
            return;
        }

        let rules = self.azure_cli
            .run_command(
                &[
                    "ml", "workspace", "outbound-rule", "list",
                    "--workspace-name", &self.workspace_name,
                    "--resource-group", &self.resource_group,
                ],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(Value::Array(rules)) = rules else {
            return;
        };

        for rule in &rules {
            let normalized = Self::normalize_rule(rule);
            if !state.outbound_rules.iter().any(|existing| existing.name == normalized.name) {
                state.outbound_rules.push(normalized);
            }
        }
    }

    fn normalize_rule(rule: &Value) -> OutboundRule {
        OutboundRule {
            name: rule["name"].as_str().unwrap_or_default().to_string(),
            rule_type: rule["type"].as_str().unwrap_or_default().to_string(),
            destination: Self::parse_destination(rule),
            category: rule["category"].as_str().unwrap_or("user-defined").to_string(),
            status: rule["status"].as_str().unwrap_or("Unknown").to_string(),
        }
    }

    /// Destination rendering depends on the rule type: FQDN rules carry a
    /// plain string, service-tag and private-endpoint rules carry objects.
    pub fn parse_destination(rule: &Value) -> String {
        let rule_type = rule["type"].as_str().unwrap_or("").to_lowercase();
        let destination = &rule["destination"];

        match rule_type.as_str() {
            "fqdn" => destination.as_str().unwrap_or("").to_string(),
            "service_tag" => match destination.as_object() {
                Some(dest) => {
                    let service_tag = dest.get("service_tag").and_then(Value::as_str).unwrap_or("");
                    let port_ranges = dest.get("port_ranges")
                        .map(display_value)
                        .unwrap_or_else(|| "Any".to_string());
                    format!("{} (Ports: {})", service_tag, port_ranges)
                }
                None => display_value(destination),
            },
            "private_endpoint" => match destination.as_object() {
                Some(dest) => dest.get("service_resource_id")
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
                    .and_then(|id| id.rsplit('/').next())
                    .unwrap_or("Unknown")
                    .to_string(),
                None => display_value(destination),
            },
            _ => display_value(destination),
        }
    }

    fn format_report(state: NetworkState) -> NetworkReport {
        let network_type = state.network_type.unwrap_or(NetworkType::None);
        let summary = Self::build_summary(&state, network_type);
        let categorized = Self::categorize_rules(&state.outbound_rules);

        NetworkReport {
            network_type,
            isolation_mode: state.isolation_mode,
            public_network_access: state.public_network_access,
            private_endpoints: PrivateEndpointSection {
                count: state.private_endpoints.len(),
                endpoints: state.private_endpoints,
            },
            outbound_rules: OutboundRuleSection {
                count: state.outbound_rules.len(),
                rules: categorized,
            },
            virtual_network: state.virtual_network,
            subnets: state.subnets,
            summary,
            vnet_details: None,
        }
    }

    fn categorize_rules(rules: &[OutboundRule]) -> CategorizedRules {
        let mut categorized = CategorizedRules::default();

        for rule in rules {
            if rule.category == "required" {
                categorized.required.push(rule.clone());
                continue;
            }
            match rule.rule_type.to_lowercase().as_str() {
                "fqdn" => categorized.fqdn.push(rule.clone()),
                "service_tag" => categorized.service_tag.push(rule.clone()),
                "private_endpoint" => categorized.private_endpoint.push(rule.clone()),
                _ => categorized.other.push(rule.clone()),
            }
        }

        categorized
    }

    fn build_summary(state: &NetworkState, network_type: NetworkType) -> NetworkSummary {
        let mut outbound: BTreeMap<String, usize> = BTreeMap::new();
        for rule in &state.outbound_rules {
            let rule_type = if rule.rule_type.is_empty() {
                "unknown".to_string()
            } else {
                rule.rule_type.clone()
            };
            *outbound.entry(rule_type).or_insert(0) += 1;
        }

        NetworkSummary {
            configuration_type: network_type,
            security_level: Self::assess_security_level(state),
            connectivity: ConnectivitySummary {
                inbound: InboundConnectivity {
                    public_access: state.public_network_access,
                    private_endpoints: state.private_endpoints.len(),
                    service_endpoints: 0,
                },
                outbound,
            },
            key_findings: Self::key_findings(state, network_type),
            recommendations: Self::recommendations(state, network_type),
        }
    }

    fn assess_security_level(state: &NetworkState) -> String {
        if !state.public_network_access {
            match state.isolation_mode {
                Some(IsolationMode::AllowOnlyApprovedOutbound) => {
                    "High - Private with approved outbound only".to_string()
                }
                Some(IsolationMode::AllowInternetOutbound) => {
                    "Medium - Private with internet outbound".to_string()
                }
                _ => "Medium - Private access only".to_string(),
            }
        } else {
            "Low - Public access enabled".to_string()
        }
    }

    fn key_findings(state: &NetworkState, network_type: NetworkType) -> Vec<String> {
        let mut findings = Vec::new();

        if state.public_network_access {
            findings.push("⚠️ Public network access is enabled".to_string());
        } else {
            findings.push("✅ Public network access is disabled".to_string());
        }

        if state.private_endpoints.is_empty() {
            findings.push("ℹ️ No private endpoints configured".to_string());
        } else {
            findings.push(format!(
                "✅ {} private endpoint(s) configured",
                state.private_endpoints.len()
            ));
        }

        match state.isolation_mode {
            Some(IsolationMode::AllowOnlyApprovedOutbound) => {
                findings.push("✅ Strict outbound control enabled".to_string());
            }
            Some(IsolationMode::AllowInternetOutbound) => {
                findings.push("⚠️ Internet outbound access allowed".to_string());
            }
            _ => {}
        }

        match network_type {
            NetworkType::Managed => findings.push(format!(
                "ℹ️ Managed VNet with {} outbound rule(s)",
                state.outbound_rules.len()
            )),
            NetworkType::Customer => {
                findings.push("ℹ️ Customer-managed VNet configuration".to_string());
            }
            NetworkType::None => {
                findings.push("ℹ️ No special network configuration detected".to_string());
            }
        }

        findings
    }

    fn recommendations(state: &NetworkState, network_type: NetworkType) -> Vec<String> {
        let mut recommendations = Vec::new();

        if state.public_network_access {
            recommendations.push(
                "Consider disabling public network access for enhanced security".to_string(),
            );
        }

        if state.private_endpoints.is_empty() && network_type != NetworkType::Managed {
            recommendations.push("Consider adding private endpoints for secure access".to_string());
        }

        if state.isolation_mode == Some(IsolationMode::AllowInternetOutbound) {
            recommendations.push(
                "Consider switching to 'allow_only_approved_outbound' for stricter control".to_string(),
            );
        }

        if network_type == NetworkType::None {
            recommendations.push(
                "Consider implementing network isolation for better security".to_string(),
            );
        }

        recommendations
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
