use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HubType {
    #[serde(rename = "azure-ml")]
    #[value(name = "azure-ml")]
    AzureMl,
    #[serde(rename = "azure-ai-foundry")]
    #[value(name = "azure-ai-foundry")]
    AiFoundry,
}

impl HubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AzureMl => "azure-ml",
            Self::AiFoundry => "azure-ai-foundry",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AzureMl => "Azure ML Workspace",
            Self::AiFoundry => "AI Foundry Hub",
        }
    }
}

impl Default for HubType {
    fn default() -> Self {
        HubType::AzureMl
    }
}

impl std::fmt::Display for HubType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
