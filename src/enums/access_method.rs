use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMethod {
    #[serde(rename = "private-endpoint")]
    PrivateEndpoint,
    #[serde(rename = "service-endpoint")]
    ServiceEndpoint,
    #[serde(rename = "public")]
    Public,
    #[serde(rename = "unknown")]
    Unknown,
}

impl AccessMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateEndpoint => "private-endpoint",
            Self::ServiceEndpoint => "service-endpoint",
            Self::Public => "public",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for AccessMethod {
    fn default() -> Self {
        AccessMethod::Unknown
    }
}

impl std::fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
