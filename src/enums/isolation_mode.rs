use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationMode {
    #[serde(rename = "allow_internet_outbound")]
    AllowInternetOutbound,
    #[serde(rename = "allow_only_approved_outbound")]
    AllowOnlyApprovedOutbound,
    #[serde(rename = "disabled")]
    Disabled,
}

impl IsolationMode {
    /// Parse the isolation mode string Azure returns on the managed network block.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "allow_internet_outbound" | "allowinternetoutbound" => Some(Self::AllowInternetOutbound),
            "allow_only_approved_outbound" | "allowonlyapprovedoutbound" => Some(Self::AllowOnlyApprovedOutbound),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllowInternetOutbound => "allow_internet_outbound",
            Self::AllowOnlyApprovedOutbound => "allow_only_approved_outbound",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for IsolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
