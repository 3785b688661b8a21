use crate::graph::NodeType;
use crate::validator::{Severity, ValidationFinding, ValidationResult};
use serde::{Deserialize, Serialize};

/// The aggregated outcome of validation and the single publish decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub can_publish: bool,
    pub summary: ReportSummary,
    pub by_severity: BySeverity,
    /// Per-node results as produced by the validator.
    pub results: Vec<ValidationResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub critical_errors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BySeverity {
    /// Campaign-level findings, most fundamental first.
    pub critical: Vec<ValidationFinding>,
    pub errors: Vec<NodeFinding>,
    pub warnings: Vec<NodeFinding>,
    pub info: Vec<NodeFinding>,
}

/// A node-level finding tagged with the node it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFinding {
    pub node_id: String,
    pub node_type: NodeType,
    pub node_title: String,
    #[serde(flatten)]
    pub finding: ValidationFinding,
}

pub struct PublishGate;

impl PublishGate {
    /// Folds node results and critical findings into a [`ValidationReport`].
    ///
    /// Publishing is allowed only with zero node errors and zero critical findings.
    /// Warnings and info never block.
    pub fn evaluate(
        results: Vec<ValidationResult>,
        mut critical: Vec<ValidationFinding>,
    ) -> ValidationReport {
        critical.sort_by_key(|finding| finding.priority.unwrap_or(u32::MAX));

        let mut by_severity = BySeverity::default();
        for result in &results {
            for finding in &result.validations {
                let bucket = match finding.severity {
                    Severity::Error => &mut by_severity.errors,
                    Severity::Warning => &mut by_severity.warnings,
                    Severity::Info => &mut by_severity.info,
                };
                bucket.push(NodeFinding {
                    node_id: result.node_id.clone(),
                    node_type: result.node_type,
                    node_title: result.node_title.clone(),
                    finding: finding.clone(),
                });
            }
        }

        let summary = ReportSummary {
            errors: by_severity.errors.len(),
            warnings: by_severity.warnings.len(),
            info: by_severity.info.len(),
            critical_errors: critical.len(),
        };
        by_severity.critical = critical;

        ValidationReport {
            can_publish: summary.errors == 0 && summary.critical_errors == 0,
            summary,
            by_severity,
            results,
        }
    }
}

impl ValidationReport {
    /// The single most fundamental blocker, if any.
    pub fn first_blocker(&self) -> Option<&ValidationFinding> {
        self.by_severity
            .critical
            .first()
            .or_else(|| self.by_severity.errors.first().map(|f| &f.finding))
    }
}
