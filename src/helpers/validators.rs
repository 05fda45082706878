use crate::config::constants::PROBE_TIMEOUT_SECS;
use crate::services::azure_cli::AzureCli;

/// Validate Azure CLI installation, ml extension and authentication.
pub async fn validate_azure_cli(azure_cli: &AzureCli) -> bool {
    if azure_cli.run_command_raw(&["--version"], PROBE_TIMEOUT_SECS).await.is_none() {
        return false;
    }

    let has_ml_extension = match azure_cli.run_command(&["extension", "list"], PROBE_TIMEOUT_SECS).await {
        Some(extensions) => extensions
            .as_array()
            .map(|list| list.iter().any(|e| e["name"] == "ml"))
            .unwrap_or(false),
        None => false,
    };
    if !has_ml_extension {
        return false;
    }

    azure_cli.is_logged_in().await
}

/// Azure ML workspace names: 3-33 characters, alphanumeric and hyphens,
/// must start and end with an alphanumeric character.
pub fn validate_workspace_name(name: &str) -> bool {
    let len = name.chars().count();
    if !(3..=33).contains(&len) {
        return false;
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap();
    let last = name.chars().last().unwrap();

    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return false;
    }

    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Azure resource group names: 1-90 characters, alphanumeric plus
/// `. _ ( ) -`, not ending with a period.
pub fn validate_resource_group_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 90 || name.ends_with('.') {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '(' | ')' | '-'))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::Arc;
    use crate::services::azure_cli::test_support::ScriptedExecutor;
    use super::*;

    #[test]
    fn workspace_names_validate_by_format() {
        assert!(validate_workspace_name("my-workspace"));
        assert!(validate_workspace_name("ws1"));
        assert!(!validate_workspace_name("ab"));
        assert!(!validate_workspace_name("-leading-hyphen"));
        assert!(!validate_workspace_name("trailing-hyphen-"));
        assert!(!validate_workspace_name("has_underscore"));
        assert!(!validate_workspace_name("a-name-that-is-way-too-long-for-azure-ml"));
    }

    #[test]
    fn resource_group_names_validate_by_format() {
        assert!(validate_resource_group_name("my-rg"));
        assert!(validate_resource_group_name("rg_1.test(prod)"));
        assert!(!validate_resource_group_name(""));
        assert!(!validate_resource_group_name("ends-with-period."));
        assert!(!validate_resource_group_name("has space"));
    }

    fn cli_with(executor: Arc<ScriptedExecutor>) -> AzureCli {
        AzureCli::with_executor(executor, None)
    }

    #[tokio::test]
    async fn cli_validation_passes_with_extension_and_login() {
        let executor = ScriptedExecutor::new();
        executor.on_stdout("--version", "azure-cli 2.60.0");
        executor.on_json("extension list", json!([{"name": "ml"}]));
        executor.on_json("account show", json!({"id": "sub"}));

        assert!(validate_azure_cli(&cli_with(executor)).await);
    }

    #[tokio::test]
    async fn cli_validation_fails_without_ml_extension() {
        let executor = ScriptedExecutor::new();
        executor.on_stdout("--version", "azure-cli 2.60.0");
        executor.on_json("extension list", json!([{"name": "aks-preview"}]));
        executor.on_json("account show", json!({"id": "sub"}));

        assert!(!validate_azure_cli(&cli_with(executor)).await);
    }

    #[tokio::test]
    async fn cli_validation_fails_when_not_installed() {
        let executor = ScriptedExecutor::new();
        assert!(!validate_azure_cli(&cli_with(executor)).await);
    }
}
