use serde::Serialize;
use serde_json::Value;

/// Deep detail for one connected resource, gathered best-effort in verbose
/// runs. Fields a query could not resolve keep their defaults.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceDetails {
    Storage(StorageDetails),
    KeyVault(KeyVaultDetails),
    ContainerRegistry(RegistryDetails),
    CognitiveServices(CognitiveServicesDetails),
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct StorageDetails {
    pub containers: Vec<ContainerInfo>,
    pub file_shares: Vec<FileShareInfo>,
    pub queues: Vec<Value>,
    pub tables: Vec<Value>,
    pub encryption: Value,
    pub static_website: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
    pub name: Option<String>,
    pub public_access: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileShareInfo {
    pub name: Option<String>,
    pub quota: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct KeyVaultDetails {
    pub access_policies: Vec<AccessPolicyInfo>,
    pub rbac_enabled: bool,
    pub soft_delete_enabled: bool,
    pub purge_protection_enabled: bool,
    pub secrets_count: usize,
    pub keys_count: usize,
    pub certificates_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessPolicyInfo {
    pub object_id: Option<String>,
    pub permissions: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryDetails {
    pub sku: String,
    pub admin_enabled: bool,
    pub public_access: bool,
    pub repositories: Vec<Value>,
    pub webhooks: Vec<WebhookInfo>,
    pub replications: Vec<ReplicationInfo>,
    pub retention_policy: Value,
}

impl Default for RegistryDetails {
    fn default() -> Self {
        Self {
            sku: "Basic".to_string(),
            admin_enabled: false,
            public_access: true,
            repositories: Vec::new(),
            webhooks: Vec::new(),
            replications: Vec::new(),
            retention_policy: Value::Null,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookInfo {
    pub name: Option<String>,
    pub status: Option<String>,
    pub actions: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplicationInfo {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CognitiveServicesDetails {
    pub kind: String,
    pub sku: Value,
    pub custom_subdomain: bool,
    pub endpoints: Value,
    pub api_properties: Value,
}

impl Default for CognitiveServicesDetails {
    fn default() -> Self {
        Self {
            kind: "Unknown".to_string(),
            sku: Value::Null,
            custom_subdomain: false,
            endpoints: Value::Null,
            api_properties: Value::Null,
        }
    }
}
