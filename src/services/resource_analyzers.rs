use serde_json::Value;
use crate::config::constants::RESOURCE_QUERY_TIMEOUT_SECS;
use crate::services::azure_cli::AzureCli;
use crate::structs::resource_details::{
    AccessPolicyInfo, CognitiveServicesDetails, ContainerInfo, FileShareInfo, KeyVaultDetails,
    RegistryDetails, ReplicationInfo, StorageDetails, WebhookInfo,
};

/// Deep storage account detail. Data-plane listings need an account key;
/// every lookup that fails leaves its field at the default.
pub async fn storage_details(
    azure_cli: &AzureCli,
    account_name: &str,
    resource_group: &str,
) -> StorageDetails {
    let mut details = StorageDetails::default();

    let keys = azure_cli
        .run_command(
            &[
                "storage", "account", "keys", "list",
                "--account-name", account_name,
                "--resource-group", resource_group,
            ],
            RESOURCE_QUERY_TIMEOUT_SECS,
        )
        .await;

    let account_key = keys
        .as_ref()
        .and_then(|keys| keys[0]["value"].as_str())
        .map(str::to_string);

    if let Some(account_key) = account_key {
        if let Some(Value::Array(containers)) = azure_cli
            .run_command(
                &[
                    "storage", "container", "list",
                    "--account-name", account_name,
                    "--account-key", &account_key,
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await
        {
            details.containers = containers.iter()
                .map(|container| ContainerInfo {
                    name: container["name"].as_str().map(str::to_string),
                    public_access: container["properties"]["publicAccess"]
                        .as_str()
                        .unwrap_or("None")
                        .to_string(),
                })
                .collect();
        }

        if let Some(Value::Array(shares)) = azure_cli
            .run_command(
                &[
                    "storage", "share", "list",
                    "--account-name", account_name,
                    "--account-key", &account_key,
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await
        {
            details.file_shares = shares.iter()
                .map(|share| FileShareInfo {
                    name: share["name"].as_str().map(str::to_string),
                    quota: share["properties"]["quota"].as_i64(),
                })
                .collect();
        }

        if let Some(Value::Array(queues)) = azure_cli
            .run_command(
                &[
                    "storage", "queue", "list",
                    "--account-name", account_name,
                    "--account-key", &account_key,
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await
        {
            details.queues = queues;
        }

        if let Some(Value::Array(tables)) = azure_cli
            .run_command(
                &[
                    "storage", "table", "list",
                    "--account-name", account_name,
                    "--account-key", &account_key,
                ],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await
        {
            details.tables = tables;
        }
    }

    if let Some(info) = azure_cli
        .run_command(
            &[
                "storage", "account", "show",
                "--name", account_name,
                "--resource-group", resource_group,
            ],
            RESOURCE_QUERY_TIMEOUT_SECS,
        )
        .await
    {
        details.encryption = info["encryption"].clone();
        details.static_website = !info["primaryEndpoints"]["web"].is_null();
    }

    details
}

/// Deep Key Vault detail. Secret/key/certificate counts need data-plane
/// permissions; misses are tolerated silently.
pub async fn key_vault_details(azure_cli: &AzureCli, vault_name: &str) -> KeyVaultDetails {
    let mut details = KeyVaultDetails::default();

    let info = azure_cli
        .run_command(&["keyvault", "show", "--name", vault_name], RESOURCE_QUERY_TIMEOUT_SECS)
        .await;

    let Some(info) = info else {
        return details;
    };

    let properties = &info["properties"];
    details.rbac_enabled = properties["enableRbacAuthorization"].as_bool().unwrap_or(false);
    details.soft_delete_enabled = properties["enableSoftDelete"].as_bool().unwrap_or(false);
    details.purge_protection_enabled = properties["enablePurgeProtection"].as_bool().unwrap_or(false);

    if let Some(policies) = properties["accessPolicies"].as_array() {
        details.access_policies = policies.iter()
            .map(|policy| AccessPolicyInfo {
                object_id: policy["objectId"].as_str().map(str::to_string),
                permissions: policy["permissions"].clone(),
            })
            .collect();
    }

    details.secrets_count = count_items(azure_cli, &["keyvault", "secret", "list", "--vault-name", vault_name]).await;
    details.keys_count = count_items(azure_cli, &["keyvault", "key", "list", "--vault-name", vault_name]).await;
    details.certificates_count =
        count_items(azure_cli, &["keyvault", "certificate", "list", "--vault-name", vault_name]).await;

    details
}

async fn count_items(azure_cli: &AzureCli, args: &[&str]) -> usize {
    match azure_cli.run_command(args, RESOURCE_QUERY_TIMEOUT_SECS).await {
        Some(Value::Array(items)) => items.len(),
        // The caller may lack data-plane permissions; keep the default
        _ => 0,
    }
}

/// Deep container registry detail; replications only exist on Premium SKUs.
pub async fn registry_details(
    azure_cli: &AzureCli,
    registry_name: &str,
    resource_group: &str,
) -> RegistryDetails {
    let mut details = RegistryDetails::default();

    let info = azure_cli
        .run_command(
            &["acr", "show", "--name", registry_name, "--resource-group", resource_group],
            RESOURCE_QUERY_TIMEOUT_SECS,
        )
        .await;

    let Some(info) = info else {
        return details;
    };

    details.sku = info["sku"]["name"].as_str().unwrap_or("Basic").to_string();
    details.admin_enabled = info["adminUserEnabled"].as_bool().unwrap_or(false);
    details.public_access = info["publicNetworkAccess"].as_str().unwrap_or("Enabled") == "Enabled";

    if let Some(Value::Array(repositories)) = azure_cli
        .run_command(&["acr", "repository", "list", "--name", registry_name], RESOURCE_QUERY_TIMEOUT_SECS)
        .await
    {
        details.repositories = repositories;
    }

    if let Some(Value::Array(webhooks)) = azure_cli
        .run_command(&["acr", "webhook", "list", "--registry", registry_name], RESOURCE_QUERY_TIMEOUT_SECS)
        .await
    {
        details.webhooks = webhooks.iter()
            .map(|webhook| WebhookInfo {
                name: webhook["name"].as_str().map(str::to_string),
                status: webhook["status"].as_str().map(str::to_string),
                actions: webhook["actions"].as_array().cloned().unwrap_or_default(),
            })
            .collect();
    }

    if details.sku == "Premium" {
        if let Some(Value::Array(replications)) = azure_cli
            .run_command(
                &["acr", "replication", "list", "--registry", registry_name],
                RESOURCE_QUERY_TIMEOUT_SECS,
            )
            .await
        {
            details.replications = replications.iter()
                .map(|replication| ReplicationInfo {
                    name: replication["name"].as_str().map(str::to_string),
                    location: replication["location"].as_str().map(str::to_string),
                    status: replication["provisioningState"].as_str().map(str::to_string),
                })
                .collect();
        }
    }

    if let Some(retention) = azure_cli
        .run_command(
            &["acr", "config", "retention", "show", "--registry", registry_name],
            RESOURCE_QUERY_TIMEOUT_SECS,
        )
        .await
    {
        details.retention_policy = retention;
    }

    details
}

/// Deep cognitive services detail.
pub async fn cognitive_services_details(
    azure_cli: &AzureCli,
    service_name: &str,
    resource_group: &str,
) -> CognitiveServicesDetails {
    let mut details = CognitiveServicesDetails::default();

    let info = azure_cli
        .run_command(
            &[
                "cognitiveservices", "account", "show",
                "--name", service_name,
                "--resource-group", resource_group,
            ],
            RESOURCE_QUERY_TIMEOUT_SECS,
        )
        .await;

    let Some(info) = info else {
        return details;
    };

    details.kind = info["kind"].as_str().unwrap_or("Unknown").to_string();
    details.sku = info["sku"].clone();
    details.custom_subdomain = !info["properties"]["customSubDomainName"].is_null();
    details.endpoints = info["properties"]["endpoints"].clone();
    details.api_properties = info["properties"]["apiProperties"].clone();

    details
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::services::azure_cli::test_support::ScriptedExecutor;
    use super::*;

    #[tokio::test]
    async fn key_vault_counts_tolerate_permission_denials() {
        let executor = ScriptedExecutor::new();
        executor.on_json(
            "keyvault show",
            json!({
                "properties": {
                    "enableRbacAuthorization": true,
                    "enableSoftDelete": true,
                    "accessPolicies": [{"objectId": "oid-1", "permissions": {"secrets": ["get"]}}],
                },
            }),
        );
        executor.on_json("keyvault secret list", json!([{"id": "s1"}, {"id": "s2"}]));
        executor.fail("keyvault key list", "Caller is not authorized");
        executor.fail("keyvault certificate list", "Caller is not authorized");
        let cli = AzureCli::with_executor(executor, None);

        let details = key_vault_details(&cli, "kv1").await;
        assert!(details.rbac_enabled);
        assert!(details.soft_delete_enabled);
        assert!(!details.purge_protection_enabled);
        assert_eq!(details.access_policies.len(), 1);
        assert_eq!(details.secrets_count, 2);
        assert_eq!(details.keys_count, 0);
        assert_eq!(details.certificates_count, 0);
    }

    #[tokio::test]
    async fn storage_detail_needs_an_account_key_for_data_plane() {
        let executor = ScriptedExecutor::new();
        executor.fail("storage account keys list", "forbidden");
        executor.on_json(
            "storage account show",
            json!({
                "encryption": {"keySource": "Microsoft.Storage"},
                "primaryEndpoints": {"web": "https://st1.web.core.windows.net/"},
            }),
        );
        let cli = AzureCli::with_executor(executor.clone(), None);

        let details = storage_details(&cli, "st1", "rg").await;
        assert!(details.containers.is_empty());
        assert!(details.static_website);
        assert_eq!(details.encryption["keySource"], "Microsoft.Storage");
        // No data-plane listings were attempted without the key
        assert_eq!(executor.call_count("storage container list"), 0);
    }

    #[tokio::test]
    async fn premium_registries_list_replications() {
        let executor = ScriptedExecutor::new();
        executor.on_json(
            "acr show",
            json!({"sku": {"name": "Premium"}, "adminUserEnabled": true, "publicNetworkAccess": "Disabled"}),
        );
        executor.on_json("acr repository list", json!(["app/api", "app/worker"]));
        executor.on_json("acr webhook list", json!([]));
        executor.on_json(
            "acr replication list",
            json!([{"name": "westus", "location": "westus", "provisioningState": "Succeeded"}]),
        );
        let cli = AzureCli::with_executor(executor, None);

        let details = registry_details(&cli, "acr1", "rg").await;
        assert_eq!(details.sku, "Premium");
        assert!(details.admin_enabled);
        assert!(!details.public_access);
        assert_eq!(details.repositories.len(), 2);
        assert_eq!(details.replications.len(), 1);
    }

    #[tokio::test]
    async fn basic_registries_skip_replication_lookup() {
        let executor = ScriptedExecutor::new();
        executor.on_json("acr show", json!({"sku": {"name": "Basic"}}));
        let cli = AzureCli::with_executor(executor.clone(), None);

        registry_details(&cli, "acr1", "rg").await;
        assert_eq!(executor.call_count("acr replication list"), 0);
    }
}
