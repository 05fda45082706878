use serde::Serialize;
use serde_json::Value;
use crate::enums::access_method::AccessMethod;
use crate::enums::connection_type::ConnectionType;

/// A resource connected to the workspace, discovered through one of the
/// discovery paths and frozen once detail analysis completes.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectedResource {
    pub resource_id: String,
    pub resource_type: String,
    pub name: String,
    pub resource_group: String,
    pub connection_type: ConnectionType,
    pub access_method: AccessMethod,
    pub private_endpoints: Vec<PrivateEndpointRef>,
    pub public_access_enabled: bool,
    pub firewall_rules: Vec<Value>,
    pub network_acls: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrivateEndpointRef {
    pub name: Option<String>,
    pub state: Option<String>,
}

impl ConnectedResource {
    pub fn new(
        resource_id: String,
        resource_type: String,
        name: String,
        resource_group: String,
        connection_type: ConnectionType,
    ) -> Self {
        Self {
            resource_id,
            resource_type,
            name,
            resource_group,
            connection_type,
            access_method: AccessMethod::Unknown,
            private_endpoints: Vec::new(),
            public_access_enabled: true,
            firewall_rules: Vec::new(),
            network_acls: Value::Null,
        }
    }

    /// Security score in [0, 100]. The deductions are additive and
    /// intentionally overlap (public access and a public access method
    /// usually co-occur); downstream consumers depend on the exact numbers.
    pub fn security_score(&self) -> u32 {
        let mut score: i32 = 100;

        if self.public_access_enabled {
            score -= 30;
        }
        if self.access_method == AccessMethod::Public {
            score -= 20;
        }
        if self.private_endpoints.is_empty() {
            score -= 10;
        }
        if self.firewall_rules.is_empty() {
            score -= 10;
        }

        score.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> ConnectedResource {
        ConnectedResource::new(
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/st".to_string(),
            "Microsoft.Storage/storageAccounts".to_string(),
            "st".to_string(),
            "rg".to_string(),
            ConnectionType::Default,
        )
    }

    #[test]
    fn public_access_caps_score_at_seventy() {
        let mut r = resource();
        r.public_access_enabled = true;
        r.access_method = AccessMethod::PrivateEndpoint;
        r.private_endpoints.push(PrivateEndpointRef { name: None, state: None });
        r.firewall_rules.push(serde_json::json!({"rule": 1}));
        assert_eq!(r.security_score(), 70);
    }

    #[test]
    fn worst_case_combination_scores_thirty() {
        let mut r = resource();
        r.public_access_enabled = true;
        r.access_method = AccessMethod::Public;
        assert!(r.private_endpoints.is_empty());
        assert!(r.firewall_rules.is_empty());
        assert_eq!(r.security_score(), 30);
    }

    #[test]
    fn public_with_one_firewall_rule_scores_forty() {
        let mut r = resource();
        r.public_access_enabled = true;
        r.access_method = AccessMethod::Public;
        r.firewall_rules.push(serde_json::json!({"allow": "10.0.0.0/8"}));
        assert_eq!(r.security_score(), 40);
    }

    #[test]
    fn fully_locked_down_scores_hundred() {
        let mut r = resource();
        r.public_access_enabled = false;
        r.access_method = AccessMethod::PrivateEndpoint;
        r.private_endpoints.push(PrivateEndpointRef {
            name: Some("pe1".to_string()),
            state: Some("Approved".to_string()),
        });
        r.firewall_rules.push(serde_json::json!({"rule": 1}));
        assert_eq!(r.security_score(), 100);
    }
}
