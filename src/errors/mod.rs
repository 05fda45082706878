use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MlConnectError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Prerequisite errors (Azure CLI, ml extension, login)
    PrerequisiteError {
        component: String,
        reason: String,
    },

    // Workspace errors
    WorkspaceError {
        workspace: String,
        operation: String,
        reason: String,
    },

    // Analysis errors
    AnalysisError {
        workspace: String,
        stage: String,
        reason: String,
        recoverable: bool,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // Report persistence errors
    ReportError {
        path: String,
        reason: String,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },

    // Multiple errors (for batch operations)
    MultipleErrors {
        errors: Vec<MlConnectError>,
        context: String,
    },
}

impl MlConnectError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn prerequisite_error(component: &str, reason: &str) -> Self {
        Self::PrerequisiteError {
            component: component.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn workspace_error(workspace: &str, operation: &str, reason: &str) -> Self {
        Self::WorkspaceError {
            workspace: workspace.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(workspace: &str, stage: &str, reason: &str, recoverable: bool) -> Self {
        Self::AnalysisError {
            workspace: workspace.to_string(),
            stage: stage.to_string(),
            reason: reason.to_string(),
            recoverable,
        }
    }

    pub fn parse_error(content_type: &str, line_number: Option<usize>, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            line_number,
            reason: reason.to_string(),
        }
    }

    pub fn report_error(path: &str, reason: &str) -> Self {
        Self::ReportError {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AnalysisError { recoverable, .. } => *recoverable,
            Self::ConfigurationError { .. } => true,
            Self::ValidationError { .. } => true,
            Self::PrerequisiteError { .. } => true,
            Self::WorkspaceError { .. } => false,
            Self::ReportError { .. } => true,
            Self::SystemError { .. } => false,
            Self::MultipleErrors { errors, .. } => errors.iter().any(|e| e.is_recoverable()),
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::WorkspaceError { .. } => ErrorSeverity::High,
            Self::AnalysisError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::PrerequisiteError { .. } => ErrorSeverity::High,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ReportError { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::MultipleErrors { errors, .. } => {
                errors.iter()
                    .map(|e| e.severity())
                    .max()
                    .unwrap_or(ErrorSeverity::Low)
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::PrerequisiteError { component, reason } => {
                format!("Prerequisite check failed for {}: {}\n💡 Install Azure CLI, run 'az login' and 'az extension add -n ml'", component, reason)
            }
            Self::WorkspaceError { workspace, operation, reason } => {
                format!("Workspace '{}' error during {}: {}\n💡 Check the workspace name, resource group and your permissions", workspace, operation, reason)
            }
            Self::AnalysisError { workspace, stage, reason, recoverable } => {
                let mut msg = format!("Analysis error for workspace '{}' during {}: {}", workspace, stage, reason);
                if *recoverable {
                    msg.push_str("\n💡 This error is recoverable - you can retry the analysis");
                } else {
                    msg.push_str("\n⚠️ This error requires manual intervention");
                }
                msg
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg.push_str("\n💡 The Azure CLI may have returned unexpected output");
                msg
            }
            Self::ReportError { path, reason } => {
                format!("Failed to write report to '{}': {}\n💡 Check directory permissions and free disk space", path, reason)
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!("Validation error for '{}': value '{}' violates constraint '{}'", field, value, constraint);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}\n💡 This may require administrator intervention", operation, reason)
            }
            Self::MultipleErrors { errors, context } => {
                let mut msg = format!("Multiple errors occurred during {}:\n", context);
                for (i, error) in errors.iter().enumerate() {
                    msg.push_str(&format!("  {}. {}\n", i + 1, error.user_message().replace('\n', "\n     ")));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }

    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::MultipleErrors { errors, context: existing_context } => {
                Self::MultipleErrors {
                    errors,
                    context: format!("{} -> {}", existing_context, context),
                }
            }
            _ => Self::MultipleErrors {
                errors: vec![self],
                context: context.to_string(),
            }
        }
    }
}

impl fmt::Display for MlConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for MlConnectError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for mlconnect operations
pub type MlConnectResult<T> = Result<T, MlConnectError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &MlConnectError) {
        let severity = error.severity();

        // Log technical details
        log::error!("[{}] {}", severity.name(), error.technical_details());

        // Print user-friendly message
        eprintln!("{} {}", severity.emoji(), error.user_message());

        match severity {
            ErrorSeverity::Critical => {
                eprintln!("🚨 Critical error detected - application may need to exit");
            }
            ErrorSeverity::High => {
                eprintln!("⚠️ High severity error - operation failed");
            }
            ErrorSeverity::Medium => {
                eprintln!("⚠️ Error occurred - some functionality may be affected");
            }
            ErrorSeverity::Low => {
                eprintln!("ℹ️ Minor issue detected - operation can continue");
            }
        }

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

/// Macro for easy error creation
#[macro_export]
macro_rules! mlconnect_error {
    (config, $msg:expr) => {
        MlConnectError::config_error($msg, None, None)
    };
    (config, $msg:expr, $field:expr) => {
        MlConnectError::config_error($msg, Some($field), None)
    };
    (prereq, $component:expr, $reason:expr) => {
        MlConnectError::prerequisite_error($component, $reason)
    };
    (workspace, $ws:expr, $op:expr, $reason:expr) => {
        MlConnectError::workspace_error($ws, $op, $reason)
    };
    (analysis, $ws:expr, $stage:expr, $reason:expr) => {
        MlConnectError::analysis_error($ws, $stage, $reason, true)
    };
    (analysis, $ws:expr, $stage:expr, $reason:expr, $recoverable:expr) => {
        MlConnectError::analysis_error($ws, $stage, $reason, $recoverable)
    };
    (validation, $field:expr, $value:expr, $constraint:expr) => {
        MlConnectError::validation_error($field, $value, $constraint, None)
    };
}

/// Extension trait for Result to add context
pub trait ResultExt<T> {
    fn with_context(self, context: &str) -> MlConnectResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<MlConnectError>,
{
    fn with_context(self, context: &str) -> MlConnectResult<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for MlConnectError {
    fn from(error: std::io::Error) -> Self {
        MlConnectError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for MlConnectError {
    fn from(error: serde_json::Error) -> Self {
        MlConnectError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for MlConnectError {
    fn from(error: toml::de::Error) -> Self {
        MlConnectError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}
