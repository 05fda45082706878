use std::collections::BTreeMap;
use serde_json::Value;
use crate::config::constants::{RESOURCE_QUERY_TIMEOUT_SECS, WORKSPACE_QUERY_TIMEOUT_SECS};
use crate::enums::access_method::AccessMethod;
use crate::enums::connection_type::ConnectionType;
use crate::enums::hub_type::HubType;
use crate::services::azure_cli::AzureCli;
use crate::services::resource_analyzers;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::connected_resource::{ConnectedResource, PrivateEndpointRef};
use crate::structs::discovery_report::DiscoveryReport;
use crate::structs::resource_details::ResourceDetails;
use crate::structs::resource_summary::ResourceSummary;
use crate::structs::security_summary::SecuritySummary;

const STORAGE_TYPE: &str = "Microsoft.Storage/storageAccounts";
const KEY_VAULT_TYPE: &str = "Microsoft.KeyVault/vaults";
const REGISTRY_TYPE: &str = "Microsoft.ContainerRegistry/registries";
const APP_INSIGHTS_TYPE: &str = "Microsoft.Insights/components";
const VNET_TYPE: &str = "Microsoft.Network/virtualNetworks";
const AKS_TYPE: &str = "Microsoft.ContainerService/managedClusters";
const COGNITIVE_TYPE: &str = "Microsoft.CognitiveServices/accounts";
const ML_COMPUTE_TYPE: &str = "Microsoft.MachineLearningServices/workspaces/computes";

/// Discovers every resource connected to the workspace, scores each for
/// security posture and builds the dependency graph. The resource list is
/// an append-only accumulator, frozen when the report is formatted.
pub struct ResourceDiscovery {
    azure_cli: AzureCli,
    workspace_name: String,
    resource_group: String,
    hub_type: HubType,
    deep_analysis: bool,
    resources: Vec<ConnectedResource>,
    resource_graph: BTreeMap<String, Vec<String>>,
    resource_details: BTreeMap<String, ResourceDetails>,
}

impl ResourceDiscovery {
    pub fn new(azure_cli: AzureCli, workspace_name: &str, resource_group: &str, hub_type: HubType) -> Self {
        Self {
            azure_cli,
            workspace_name: workspace_name.to_string(),
            resource_group: resource_group.to_string(),
            hub_type,
            deep_analysis: false,
            resources: Vec::new(),
            resource_graph: BTreeMap::new(),
            resource_details: BTreeMap::new(),
        }
    }

    /// Also gather deep per-resource detail (containers, vault policies,
    /// registry repositories) during analysis.
    pub fn with_deep_analysis(mut self, enabled: bool) -> Self {
        self.deep_analysis = enabled;
        self
    }

    pub async fn analyze(&mut self) -> AnalysisResult<DiscoveryReport> {
        let workspace_info = match self.workspace_info().await {
            Some(info) => info,
            None => {
                return AnalysisResult::failure(
                    "Resource discovery failed: unable to fetch workspace information",
                    "Unable to fetch workspace information",
                );
            }
        };

        self.discover_default_resources(&workspace_info);
        self.discover_associated_resources().await;
        if self.hub_type == HubType::AiFoundry {
            self.discover_user_connections().await;
        }

        for index in 0..self.resources.len() {
            self.analyze_resource(index).await;
        }

        if self.deep_analysis {
            self.collect_resource_details().await;
        }

        self.build_dependency_graph();

        AnalysisResult::success(
            "Resource discovery completed successfully",
            self.format_results(),
        )
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

    /// Resources attached directly to the workspace descriptor.
    fn discover_default_resources(&mut self, workspace_info: &Value) {
        let defaults = [
            ("storage_account", STORAGE_TYPE),
            ("key_vault", KEY_VAULT_TYPE),
            ("container_registry", REGISTRY_TYPE),
            ("application_insights", APP_INSIGHTS_TYPE),
        ];

        for (key, resource_type) in defaults {
            if let Some(resource_id) = workspace_info[key].as_str() {
                self.add_resource(resource_id, resource_type, ConnectionType::Default);
            }
        }
    }

    async fn discover_associated_resources(&mut self) {
        self.discover_compute_resources().await;
        self.discover_datastores().await;
    }

    async fn discover_compute_resources(&mut self) {
        let computes = self.azure_cli
            .run_command(
                &[
                    "ml", "compute", "list",
                    "--workspace-name", &self.workspace_name,
                    "--resource-group", &self.resource_group,
                ],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(Value::Array(computes)) = computes else {
            log::warn!("⚠️ Failed to discover compute resources for {}", self.workspace_name);
            return;
        };

        for compute in &computes {
            match compute["type"].as_str().unwrap_or("").to_lowercase().as_str() {
                "computeinstance" | "amlcompute" => self.add_compute_vnet(compute),
                "kubernetes" => self.add_kubernetes_compute(compute),
                _ => {}
            }
        }
    }

    /// Compute instances and clusters pull their subnet's VNet in as an
    /// associated resource.
    fn add_compute_vnet(&mut self, compute: &Value) {
        let subnet_id = compute["properties"]["properties"]["subnet"]["id"].as_str().unwrap_or("");
        if subnet_id.is_empty() {
            return;
        }

        // Strip "/subnets/{name}" to get the VNet id
        let parts: Vec<&str> = subnet_id.split('/').collect();
        if parts.len() > 2 {
            let vnet_id = parts[..parts.len() - 2].join("/");
            self.add_resource(&vnet_id, VNET_TYPE, ConnectionType::Associated);
        }
    }

    /// Kubernetes attachments reference external AKS clusters.
    fn add_kubernetes_compute(&mut self, compute: &Value) {
        if let Some(resource_id) = compute["properties"]["resourceId"].as_str() {
            self.add_resource(resource_id, AKS_TYPE, ConnectionType::Associated);
        }
    }

    async fn discover_datastores(&mut self) {
        let datastores = self.azure_cli
            .run_command(
                &[
                    "ml", "datastore", "list",
                    "--workspace-name", &self.workspace_name,
                    "--resource-group", &self.resource_group,
                ],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(Value::Array(datastores)) = datastores else {
            log::warn!("⚠️ Failed to discover datastores for {}", self.workspace_name);
            return;
        };

        for datastore in &datastores {
            if datastore["type"].as_str().unwrap_or("").to_lowercase() != "azure_blob" {
                continue;
            }

            if let Some(account_name) = datastore["account_name"].as_str() {
                // The datastore only exposes the account name; synthesize an
                // id with a wildcard resource group
                let resource_id = format!(
                    "/subscriptions/{}/resourceGroups/*/providers/{}/{}",
                    self.azure_cli.subscription_id().unwrap_or("unknown"),
                    STORAGE_TYPE,
                    account_name,
                );
                self.add_resource(&resource_id, STORAGE_TYPE, ConnectionType::UserDefined);
            }
        }
    }

    /// AI Foundry hubs carry user-defined connections to OpenAI, cognitive
    /// services and custom targets.
    async fn discover_user_connections(&mut self) {
        let connections = self.azure_cli
            .run_command(
                &[
                    "ml", "connection", "list",
                    "--workspace-name", &self.workspace_name,
                    "--resource-group", &self.resource_group,
                ],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(Value::Array(connections)) = connections else {
            log::warn!("⚠️ Failed to discover user connections for {}", self.workspace_name);
            return;
        };

        for connection in &connections {
            match connection["type"].as_str().unwrap_or("").to_lowercase().as_str() {
                "azure_openai" | "cognitive_services" => self.add_cognitive_connection(connection),
                // Custom connections point at arbitrary targets; nothing to
                // resolve into a resource id
                "custom" => {}
                _ => {}
            }
        }
    }

    fn add_cognitive_connection(&mut self, connection: &Value) {
        let Some(service_name) = connection["target"]
            .as_str()
            .and_then(extract_service_name)
        else {
            return;
        };

        let resource_id = format!(
            "/subscriptions/{}/resourceGroups/*/providers/{}/{}",
            self.azure_cli.subscription_id().unwrap_or("unknown"),
            COGNITIVE_TYPE,
            service_name,
        );
        self.add_resource(&resource_id, COGNITIVE_TYPE, ConnectionType::UserDefined);
    }

    /// The single dedup gate: adding an id already present is a no-op.
    fn add_resource(&mut self, resource_id: &str, resource_type: &str, connection_type: ConnectionType) {
        let parts: Vec<&str> = resource_id.split('/').collect();
        if parts.len() < 9 {
            return;
        }

        if self.resources.iter().any(|r| r.resource_id == resource_id) {
            return;
        }

        let resource_group = if parts.len() > 4 {
            parts[4].to_string()
        } else {
            self.resource_group.clone()
        };

        self.resources.push(ConnectedResource::new(
            resource_id.to_string(),
            resource_type.to_string(),
            parts[parts.len() - 1].to_string(),
            resource_group,
            connection_type,
        ));
    }

    async fn analyze_resource(&mut self, index: usize) {
        let resource_type = self.resources[index].resource_type.clone();

        match resource_type.as_str() {
            STORAGE_TYPE => self.analyze_storage_account(index).await,
            KEY_VAULT_TYPE => self.analyze_key_vault(index).await,
            REGISTRY_TYPE => self.analyze_container_registry(index).await,
            COGNITIVE_TYPE => self.analyze_cognitive_services(index).await,
            _ => {}
        }
    }

    async fn analyze_storage_account(&mut self, index: usize) {
        let (name, resource_group) = self.resource_identity(index);

        let info = self.azure_cli
            .run_command(
                &["storage", "account", "show", "--name", &name, "--resource-group", &resource_group],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(info) = info else {
            log::warn!("⚠️ Failed to analyze storage account {}", name);
            return;
        };

        let resource = &mut self.resources[index];
        resource.public_access_enabled =
            info["publicNetworkAccess"].as_str().unwrap_or("Enabled") == "Enabled";
        resource.private_endpoints = endpoint_refs(&info["privateEndpointConnections"], false);
        resource.network_acls = info["networkAcls"].clone();
        resource.access_method = access_method(resource);
    }

    async fn analyze_key_vault(&mut self, index: usize) {
        let (name, _) = self.resource_identity(index);

        let info = self.azure_cli
            .run_command(&["keyvault", "show", "--name", &name], RESOURCE_QUERY_TIMEOUT_SECS)
            .await;

        let Some(info) = info else {
            log::warn!("⚠️ Failed to analyze key vault {}", name);
            return;
        };

        {
            let resource = &mut self.resources[index];
            resource.public_access_enabled =
                info["properties"]["publicNetworkAccess"].as_str().unwrap_or("Enabled") == "Enabled";
            resource.private_endpoints =
                endpoint_refs(&info["properties"]["privateEndpointConnections"], true);
        }

        let network_acls = self.azure_cli
            .run_command(
                &["keyvault", "network-rule", "list", "--name", &name],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let resource = &mut self.resources[index];
        if let Some(acls) = network_acls {
            resource.network_acls = acls;
        }
        resource.access_method = access_method(resource);
    }

    async fn analyze_container_registry(&mut self, index: usize) {
        let (name, resource_group) = self.resource_identity(index);

        let info = self.azure_cli
            .run_command(
                &["acr", "show", "--name", &name, "--resource-group", &resource_group],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(info) = info else {
            log::warn!("⚠️ Failed to analyze container registry {}", name);
            return;
        };

        let resource = &mut self.resources[index];
        resource.public_access_enabled =
            info["publicNetworkAccess"].as_str().unwrap_or("Enabled") == "Enabled";
        resource.private_endpoints = endpoint_refs(&info["privateEndpointConnections"], false);
        resource.access_method = access_method(resource);
    }

    async fn analyze_cognitive_services(&mut self, index: usize) {
        let (name, resource_group) = self.resource_identity(index);

        let info = self.azure_cli
            .run_command(
                &[
                    "cognitiveservices", "account", "show",
                    "--name", &name,
                    "--resource-group", &resource_group,
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await;

        let Some(info) = info else {
            log::warn!("⚠️ Failed to analyze cognitive services {}", name);
            return;
        };

        let resource = &mut self.resources[index];
        resource.public_access_enabled =
            info["properties"]["publicNetworkAccess"].as_str().unwrap_or("Enabled") == "Enabled";
        resource.private_endpoints =
            endpoint_refs(&info["properties"]["privateEndpointConnections"], true);
        resource.access_method = access_method(resource);
    }

    fn resource_identity(&self, index: usize) -> (String, String) {
        let resource = &self.resources[index];
        (resource.name.clone(), resource.resource_group.clone())
    }

    async fn collect_resource_details(&mut self) {
        for resource in &self.resources {
            let details = match resource.resource_type.as_str() {
                STORAGE_TYPE => Some(ResourceDetails::Storage(
                    resource_analyzers::storage_details(
                        &self.azure_cli,
                        &resource.name,
                        &resource.resource_group,
                    )
                    .await,
                )),
                KEY_VAULT_TYPE => Some(ResourceDetails::KeyVault(
                    resource_analyzers::key_vault_details(&self.azure_cli, &resource.name).await,
                )),
                REGISTRY_TYPE => Some(ResourceDetails::ContainerRegistry(
                    resource_analyzers::registry_details(
                        &self.azure_cli,
                        &resource.name,
                        &resource.resource_group,
                    )
                    .await,
                )),
                COGNITIVE_TYPE => Some(ResourceDetails::CognitiveServices(
                    resource_analyzers::cognitive_services_details(
                        &self.azure_cli,
                        &resource.name,
                        &resource.resource_group,
                    )
                    .await,
                )),
                _ => None,
            };

            if let Some(details) = details {
                self.resource_details.insert(resource.name.clone(), details);
            }
        }
    }

    fn build_dependency_graph(&mut self) {
        for resource in &self.resources {
            let mut dependencies = Vec::new();

            if resource.resource_type == ML_COMPUTE_TYPE {
                dependencies.extend(
                    self.resources.iter()
                        .filter(|r| r.resource_type == STORAGE_TYPE)
                        .map(|r| r.resource_id.clone()),
                );
            }

            self.resource_graph.insert(resource.resource_id.clone(), dependencies);
        }
    }

    fn format_results(&self) -> DiscoveryReport {
        let mut resources_by_type: BTreeMap<String, Vec<ResourceSummary>> = BTreeMap::new();

        for resource in &self.resources {
            let type_key = resource.resource_type
                .rsplit('/')
                .next()
                .unwrap_or(&resource.resource_type)
                .to_string();
            resources_by_type.entry(type_key).or_default().push(ResourceSummary::from(resource));
        }

        DiscoveryReport {
            total_resources: self.resources.len(),
            resources_by_type,
            security_summary: self.security_summary(),
            dependency_graph: self.resource_graph.clone(),
            resource_details: self.resource_details.clone(),
        }
    }

    fn security_summary(&self) -> SecuritySummary {
        let total = self.resources.len();
        let public_accessible = self.resources.iter().filter(|r| r.public_access_enabled).count();
        let private_endpoint_protected =
            self.resources.iter().filter(|r| !r.private_endpoints.is_empty()).count();

        let average_security_score = if total > 0 {
            let sum: u32 = self.resources.iter().map(ConnectedResource::security_score).sum();
            (sum as f64 / total as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };

        SecuritySummary {
            total_resources: total,
            public_accessible,
            private_endpoint_protected,
            average_security_score,
            recommendations: self.resource_recommendations(),
        }
    }

    fn resource_recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();

        let public_count = self.resources.iter().filter(|r| r.public_access_enabled).count();
        if public_count > 0 {
            recommendations.push(format!(
                "Consider disabling public access for {} resources",
                public_count
            ));
        }

        let default_without_pe = self.resources.iter()
            .filter(|r| r.private_endpoints.is_empty() && r.connection_type == ConnectionType::Default)
            .count();
        if default_without_pe > 0 {
            recommendations.push(format!(
                "Consider adding private endpoints to {} default resources",
                default_without_pe
            ));
        }

        recommendations
    }
}

/// Private endpoints present means private-endpoint access; otherwise a
/// disabled public endpoint implies service-endpoint reachability.
fn access_method(resource: &ConnectedResource) -> AccessMethod {
    if !resource.private_endpoints.is_empty() {
        AccessMethod::PrivateEndpoint
    } else if !resource.public_access_enabled {
        AccessMethod::ServiceEndpoint
    } else {
        AccessMethod::Public
    }
}

fn endpoint_refs(connections: &Value, nested_properties: bool) -> Vec<PrivateEndpointRef> {
    connections.as_array()
        .map(|list| {
            list.iter()
                .map(|pe| {
                    let state = if nested_properties {
                        &pe["properties"]["privateLinkServiceConnectionState"]["status"]
                    } else {
                        &pe["privateLinkServiceConnectionState"]["status"]
                    };
                    PrivateEndpointRef {
                        name: pe["name"].as_str().map(str::to_string),
                        state: state.as_str().map(str::to_string),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// First label of the target endpoint's host, e.g.
/// "https://my-openai.openai.azure.com/" -> "my-openai".
fn extract_service_name(target: &str) -> Option<String> {
    let host = target.split("://").nth(1)?.split('/').next()?;
    let service = host.split('.').next()?;
    if service.is_empty() {
        None
    } else {
        Some(service.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::Arc;
    use crate::services::azure_cli::test_support::ScriptedExecutor;
    use super::*;

    fn workspace_descriptor() -> Value {
        json!({
            "storage_account": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/wsstorage",
            "key_vault": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.KeyVault/vaults/wskv",
        })
    }

    fn discovery_with(executor: Arc<ScriptedExecutor>, hub_type: HubType) -> ResourceDiscovery {
        ResourceDiscovery::new(
            AzureCli::with_executor(executor, Some("sub-1".to_string())),
            "ws1",
            "rg",
            hub_type,
        )
    }

    #[tokio::test]
    async fn discovers_defaults_and_scores_them() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", workspace_descriptor());
        executor.on_json("ml compute list", json!([]));
        executor.on_json("ml datastore list", json!([]));
        executor.on_json(
            "storage account show",
            json!({
                "publicNetworkAccess": "Enabled",
                "privateEndpointConnections": [],
                "networkAcls": {"defaultAction": "Allow"},
            }),
        );
        executor.on_json(
            "keyvault show",
            json!({
                "properties": {
                    "publicNetworkAccess": "Disabled",
                    "privateEndpointConnections": [
                        {"name": "pe-kv", "properties": {"privateLinkServiceConnectionState": {"status": "Approved"}}},
                    ],
                },
            }),
        );
        executor.on_json("keyvault network-rule list", json!({"ipRules": []}));

        let mut discovery = discovery_with(executor, HubType::AzureMl);
        let result = discovery.analyze().await;
        assert!(result.success);

        let report = result.data.unwrap();
        assert_eq!(report.total_resources, 2);

        let storage = &report.resources_by_type["storageAccounts"][0];
        assert_eq!(storage.name, "wsstorage");
        assert_eq!(storage.access_method, AccessMethod::Public);
        // 100 - 30 (public) - 20 (public method) - 10 (no PEs) - 10 (no firewall)
        assert_eq!(storage.security_score, 30);

        let vault = &report.resources_by_type["vaults"][0];
        assert_eq!(vault.access_method, AccessMethod::PrivateEndpoint);
        // Only the no-firewall-rules deduction applies
        assert_eq!(vault.security_score, 90);

        let summary = &report.security_summary;
        assert_eq!(summary.public_accessible, 1);
        assert_eq!(summary.private_endpoint_protected, 1);
        assert_eq!(summary.average_security_score, 60.0);
        assert_eq!(summary.recommendations.len(), 2);
        assert!(summary.recommendations[0].contains("disabling public access for 1"));
        assert!(summary.recommendations[1].contains("private endpoints to 1 default"));
    }

    #[tokio::test]
    async fn add_resource_is_idempotent_per_id() {
        let executor = ScriptedExecutor::new();
        let mut discovery = discovery_with(executor, HubType::AzureMl);

        let id = "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/st1";
        discovery.add_resource(id, STORAGE_TYPE, ConnectionType::Default);
        discovery.add_resource(id, STORAGE_TYPE, ConnectionType::UserDefined);
        assert_eq!(discovery.resources.len(), 1);
        assert_eq!(discovery.resources[0].connection_type, ConnectionType::Default);
    }

    #[tokio::test]
    async fn short_resource_ids_are_ignored() {
        let executor = ScriptedExecutor::new();
        let mut discovery = discovery_with(executor, HubType::AzureMl);

        discovery.add_resource("/subscriptions/s/short", STORAGE_TYPE, ConnectionType::Default);
        assert!(discovery.resources.is_empty());
    }

    #[tokio::test]
    async fn compute_subnets_pull_in_their_vnet_once() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", json!({}));
        executor.on_json(
            "ml compute list",
            json!([
                {"type": "ComputeInstance", "properties": {"properties": {"subnet": {
                    "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/snet1"}}}},
                {"type": "AmlCompute", "properties": {"properties": {"subnet": {
                    "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/snet2"}}}},
                {"type": "Kubernetes", "properties": {
                    "resourceId": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ContainerService/managedClusters/aks1"}},
            ]),
        );
        executor.on_json("ml datastore list", json!([]));

        let mut discovery = discovery_with(executor, HubType::AzureMl);
        let report = discovery.analyze().await.data.unwrap();

        // Both subnets resolve to the same VNet id; the AKS cluster adds one
        assert_eq!(report.total_resources, 2);
        assert!(report.resources_by_type.contains_key("virtualNetworks"));
        assert!(report.resources_by_type.contains_key("managedClusters"));
    }

    #[tokio::test]
    async fn blob_datastores_become_user_defined_storage() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", json!({}));
        executor.on_json("ml compute list", json!([]));
        executor.on_json(
            "ml datastore list",
            json!([
                {"type": "azure_blob", "account_name": "datastorage"},
                {"type": "azure_file", "account_name": "ignored"},
            ]),
        );

        let mut discovery = discovery_with(executor, HubType::AzureMl);
        let report = discovery.analyze().await.data.unwrap();

        let storage = &report.resources_by_type["storageAccounts"][0];
        assert_eq!(storage.name, "datastorage");
        assert_eq!(storage.connection_type, ConnectionType::UserDefined);
        assert_eq!(storage.resource_group, "*");
    }

    #[tokio::test]
    async fn foundry_hubs_discover_openai_connections() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", json!({}));
        executor.on_json("ml compute list", json!([]));
        executor.on_json("ml datastore list", json!([]));
        executor.on_json(
            "ml connection list",
            json!([
                {"type": "azure_openai", "target": "https://my-openai.openai.azure.com/"},
                {"type": "custom", "target": "https://example.com/api"},
            ]),
        );
        executor.on_json(
            "cognitiveservices account show",
            json!({"properties": {"publicNetworkAccess": "Enabled", "privateEndpointConnections": []}}),
        );

        let mut discovery = discovery_with(executor.clone(), HubType::AiFoundry);
        let report = discovery.analyze().await.data.unwrap();

        assert_eq!(report.total_resources, 1);
        let account = &report.resources_by_type["accounts"][0];
        assert_eq!(account.name, "my-openai");
        assert_eq!(account.connection_type, ConnectionType::UserDefined);
    }

    #[tokio::test]
    async fn non_foundry_workspaces_skip_user_connections() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", json!({}));
        executor.on_json("ml compute list", json!([]));
        executor.on_json("ml datastore list", json!([]));

        let mut discovery = discovery_with(executor.clone(), HubType::AzureMl);
        discovery.analyze().await;

        assert_eq!(executor.call_count("ml connection list"), 0);
    }

    #[tokio::test]
    async fn detail_fetch_failure_keeps_constructed_defaults() {
        let executor = ScriptedExecutor::new();
        executor.on_json(
            "ml workspace show",
            json!({"storage_account": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/st1"}),
        );
        executor.on_json("ml compute list", json!([]));
        executor.on_json("ml datastore list", json!([]));
        executor.fail("storage account show", "forbidden");

        let mut discovery = discovery_with(executor, HubType::AzureMl);
        let result = discovery.analyze().await;
        assert!(result.success);

        let report = result.data.unwrap();
        assert_eq!(report.total_resources, 1);
        let storage = &report.resources_by_type["storageAccounts"][0];
        assert_eq!(storage.access_method, AccessMethod::Unknown);
        assert!(storage.public_access);
    }

    #[tokio::test]
    async fn workspace_fetch_failure_aborts_the_stage() {
        let executor = ScriptedExecutor::new();
        executor.fail("ml workspace show", "no access");

        let mut discovery = discovery_with(executor, HubType::AzureMl);
        let result = discovery.analyze().await;
        assert!(!result.success);
        assert!(result.data.is_none());
    }

    #[test]
    fn service_names_come_from_endpoint_hosts() {
        assert_eq!(
            extract_service_name("https://my-openai.openai.azure.com/"),
            Some("my-openai".to_string())
        );
        assert_eq!(extract_service_name("no-scheme.example.com"), None);
    }

    #[tokio::test]
    async fn dependency_graph_has_one_entry_per_resource() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", workspace_descriptor());
        executor.on_json("ml compute list", json!([]));
        executor.on_json("ml datastore list", json!([]));

        let mut discovery = discovery_with(executor, HubType::AzureMl);
        let report = discovery.analyze().await.data.unwrap();

        assert_eq!(report.dependency_graph.len(), 2);
        assert!(report.dependency_graph.values().all(Vec::is_empty));
    }
}
