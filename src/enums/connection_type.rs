use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "associated")]
    Associated,
    #[serde(rename = "user-defined")]
    UserDefined,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Associated => "associated",
            Self::UserDefined => "user-defined",
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
