use std::collections::BTreeSet;
use serde_json::Value;
use crate::config::constants::WORKSPACE_QUERY_TIMEOUT_SECS;
use crate::enums::hub_type::HubType;
use crate::enums::isolation_mode::IsolationMode;
use crate::errors::{MlConnectError, MlConnectResult};
use crate::services::azure_cli::AzureCli;
use crate::structs::workspace_config::WorkspaceConfig;

/// Which analysis strategy applies to the workspace's network setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceAnalyzerKind {
    ManagedVnet,
    CustomerManagedVnet,
}

/// Connects to a workspace or hub and extracts its network configuration.
/// The kind tag is chosen by probing the managed-network block of the
/// workspace descriptor.
pub struct WorkspaceAnalyzer {
    azure_cli: AzureCli,
    workspace_name: String,
    resource_group: String,
    hub_type: HubType,
    kind: WorkspaceAnalyzerKind,
}

impl WorkspaceAnalyzer {
    /// Probe the workspace and return the right analyzer along with the raw
    /// workspace descriptor.
    pub async fn for_workspace(
        azure_cli: AzureCli,
        workspace_name: &str,
        resource_group: &str,
        hub_type: HubType,
    ) -> MlConnectResult<(Self, Value)> {
        let workspace_info = azure_cli
            .run_command(
                &["ml", "workspace", "show", "--name", workspace_name, "--resource-group", resource_group],
                WORKSPACE_QUERY_TIMEOUT_SECS,
            )
            .await
            .ok_or_else(|| {
                MlConnectError::workspace_error(
                    workspace_name,
                    "connect",
                    "Unable to fetch workspace information",
                )
            })?;

        let has_managed_network = workspace_info["managed_network"]
            .as_object()
            .map(|block| !block.is_empty())
            .unwrap_or(false);

        let kind = if has_managed_network {
            log::info!("🔎 Detected managed virtual network {}", hub_type);
            WorkspaceAnalyzerKind::ManagedVnet
        } else {
            log::info!("🔎 Detected customer-managed virtual network {}", hub_type);
            WorkspaceAnalyzerKind::CustomerManagedVnet
        };

        let analyzer = Self {
            azure_cli,
            workspace_name: workspace_name.to_string(),
            resource_group: resource_group.to_string(),
            hub_type,
            kind,
        };

        Ok((analyzer, workspace_info))
    }

    pub fn kind(&self) -> WorkspaceAnalyzerKind {
        self.kind
    }

    /// Build the workspace configuration from the raw descriptor plus the
    /// outbound-rule inventory.
    pub async fn analyze(&self, workspace_info: &Value) -> WorkspaceConfig {
        let (network_mode, isolation_mode) = match self.kind {
            WorkspaceAnalyzerKind::ManagedVnet => {
                let isolation = workspace_info["managed_network"]["isolation_mode"]
                    .as_str()
                    .and_then(IsolationMode::parse)
                    .unwrap_or(IsolationMode::AllowInternetOutbound);
                ("managed".to_string(), Some(isolation))
            }
            // Network rules for customer VNets live in NSGs, firewalls and
            // route tables, not on the workspace
            WorkspaceAnalyzerKind::CustomerManagedVnet => ("customer_managed".to_string(), None),
        };

        let existing_rules = self.fetch_outbound_rules().await;

        let mut existing_domains = BTreeSet::new();
        for rule in &existing_rules {
            if rule["type"] == "fqdn" {
                if let Some(destination) = rule["destination"].as_str() {
                    if !destination.is_empty() {
                        existing_domains.insert(destination.to_string());
                    }
                }
            }
        }

        let subscription_id = workspace_info["id"]
            .as_str()
            .and_then(|id| id.split('/').nth(2))
            .unwrap_or_default()
            .to_string();

        WorkspaceConfig {
            name: self.workspace_name.clone(),
            resource_group: self.resource_group.clone(),
            subscription_id,
            network_mode,
            isolation_mode,
            existing_outbound_rules: existing_rules,
            existing_domains,
            location: workspace_info["location"].as_str().unwrap_or_default().to_string(),
            private_endpoint_enabled: workspace_info["public_network_access"].as_str() == Some("Disabled"),
            hub_type: self.hub_type,
        }
    }

    async fn fetch_outbound_rules(&self) -> Vec<Value> {
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

        match rules {
            Some(Value::Array(rules)) => rules,
            Some(_) | None => {
                match self.kind {
                    WorkspaceAnalyzerKind::ManagedVnet => {
                        log::warn!("⚠️ Could not retrieve existing outbound rules for {}", self.workspace_name);
                    }
                    WorkspaceAnalyzerKind::CustomerManagedVnet => {
                        log::debug!(
                            "No workspace-level outbound rules found (expected for customer-managed VNet)"
                        );
                    }
                }
                Vec::new()
            }
        }
    }

    /// Domains from `required` that no existing rule covers. Customer-managed
    /// VNets have no workspace-level rules, so everything is missing there.
    pub fn missing_domains(&self, config: &WorkspaceConfig, required_domains: &[String]) -> Vec<String> {
        if self.kind == WorkspaceAnalyzerKind::CustomerManagedVnet {
            return required_domains.to_vec();
        }

        required_domains.iter()
            .filter(|domain| {
                !config.existing_domains.iter().any(|existing| domain_matches(domain, existing))
            })
            .cloned()
            .collect()
    }
}

/// Whether an existing rule domain covers a required domain, honoring
/// wildcard prefixes.
fn domain_matches(required_domain: &str, existing_domain: &str) -> bool {
    if required_domain == existing_domain {
        return true;
    }

    let required_clean = required_domain.trim_start_matches("*.");
    let existing_clean = existing_domain.trim_start_matches("*.");

    existing_domain.starts_with("*.") && required_clean.ends_with(existing_clean)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::services::azure_cli::test_support::ScriptedExecutor;
    use super::*;

    fn workspace_descriptor(managed: bool) -> Value {
        let mut descriptor = json!({
            "id": "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.MachineLearningServices/workspaces/ws1",
            "location": "westeurope",
            "public_network_access": "Disabled",
        });
        if managed {
            descriptor["managed_network"] = json!({"isolation_mode": "allow_only_approved_outbound"});
        }
        descriptor
    }

    #[tokio::test]
    async fn managed_workspace_is_detected_and_analyzed() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", workspace_descriptor(true));
        executor.on_json(
            "outbound-rule list",
            json!([{"type": "fqdn", "destination": "*.pypi.org"}]),
        );
        let cli = AzureCli::with_executor(executor, None);

        let (analyzer, info) =
            WorkspaceAnalyzer::for_workspace(cli, "ws1", "rg", HubType::AzureMl).await.unwrap();
        assert_eq!(analyzer.kind(), WorkspaceAnalyzerKind::ManagedVnet);

        let config = analyzer.analyze(&info).await;
        assert_eq!(config.network_mode, "managed");
        assert_eq!(config.isolation_mode, Some(IsolationMode::AllowOnlyApprovedOutbound));
        assert_eq!(config.subscription_id, "sub-1");
        assert!(config.private_endpoint_enabled);
        assert!(config.existing_domains.contains("*.pypi.org"));
    }

    #[tokio::test]
    async fn customer_workspace_has_no_isolation_mode() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", workspace_descriptor(false));
        let cli = AzureCli::with_executor(executor, None);

        let (analyzer, info) =
            WorkspaceAnalyzer::for_workspace(cli, "ws1", "rg", HubType::AiFoundry).await.unwrap();
        assert_eq!(analyzer.kind(), WorkspaceAnalyzerKind::CustomerManagedVnet);

        let config = analyzer.analyze(&info).await;
        assert_eq!(config.network_mode, "customer_managed");
        assert!(config.isolation_mode.is_none());
        assert!(config.existing_outbound_rules.is_empty());
    }

    #[tokio::test]
    async fn unreachable_workspace_is_an_error() {
        let executor = ScriptedExecutor::new();
        executor.fail("ml workspace show", "not found");
        let cli = AzureCli::with_executor(executor, None);

        let result = WorkspaceAnalyzer::for_workspace(cli, "ws1", "rg", HubType::AzureMl).await;
        assert!(result.is_err());
    }

    #[test]
    fn wildcard_domains_cover_subdomains() {
        assert!(domain_matches("pypi.org", "pypi.org"));
        assert!(domain_matches("files.pypi.org", "*.pypi.org"));
        assert!(domain_matches("*.pypi.org", "*.pypi.org"));
        assert!(!domain_matches("pypi.org", "conda.org"));
        assert!(!domain_matches("files.pypi.org", "conda.org"));
    }

    #[tokio::test]
    async fn missing_domains_respects_existing_rules() {
        let executor = ScriptedExecutor::new();
        executor.on_json("ml workspace show", workspace_descriptor(true));
        executor.on_json(
            "outbound-rule list",
            json!([{"type": "fqdn", "destination": "*.pypi.org"}]),
        );
        let cli = AzureCli::with_executor(executor, None);

        let (analyzer, info) =
            WorkspaceAnalyzer::for_workspace(cli, "ws1", "rg", HubType::AzureMl).await.unwrap();
        let config = analyzer.analyze(&info).await;

        let required = vec!["files.pypi.org".to_string(), "anaconda.org".to_string()];
        let missing = analyzer.missing_domains(&config, &required);
        assert_eq!(missing, vec!["anaconda.org".to_string()]);
    }
}
