use crate::graph::NodeType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single failed check. Findings only exist for checks that did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFinding {
    pub id: String,
    pub is_valid: bool,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Set on campaign-level findings; lower is more fundamental.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// All findings for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub node_id: String,
    pub node_type: NodeType,
    pub node_title: String,
    pub validations: Vec<ValidationFinding>,
}

impl ValidationFinding {
    fn new(id: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            is_valid: false,
            message: message.into(),
            severity,
            field: None,
            priority: None,
        }
    }

    pub fn error(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Error, message)
    }

    pub fn warning(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Warning, message)
    }

    pub fn info(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Info, message)
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.validations.iter().any(ValidationFinding::is_error)
    }
}
