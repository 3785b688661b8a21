//! Publish-safety checks over a campaign graph.
//!
//! Validation never fails: every problem is returned as a [`ValidationFinding`] so a UI
//! can show all of them at once. A node without findings is left out of the output.
use crate::config::ValidationConfig;
use crate::graph::{Graph, GraphReader, Node, NodeKind};
use crate::publish::{PublishGate, ValidationReport};
use tracing::debug;

mod context;
mod critical;
mod finding;
mod rules;
pub mod tolerance;

pub use context::*;
pub use critical::{LANDING_PAGES_PRIORITY, LEAD_FORM_PRIORITY, TRAFFIC_SOURCE_PRIORITY};
pub use finding::*;
use rules::NodeRules;

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Node-level findings, in graph node order.
    pub fn validate(&self, graph: &Graph, context: &ValidationContext) -> Vec<ValidationResult> {
        let reader = GraphReader::new(graph);
        self.validate_nodes(&reader, context)
    }

    /// Campaign-level findings, sorted by ascending priority.
    pub fn critical_findings(
        &self,
        graph: &Graph,
        context: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        critical::campaign_findings(&GraphReader::new(graph), context)
    }

    /// Runs every check and folds the outcome into a publish decision.
    pub fn report(&self, graph: &Graph, context: &ValidationContext) -> ValidationReport {
        let reader = GraphReader::new(graph);
        let critical = critical::campaign_findings(&reader, context);
        let results = self.validate_nodes(&reader, context);
        PublishGate::evaluate(results, critical)
    }

    fn validate_nodes(
        &self,
        reader: &GraphReader<'_>,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        let rules = NodeRules {
            reader,
            context,
            config: &self.config,
        };

        reader
            .graph()
            .nodes
            .iter()
            .filter(|node| {
                let marker = self.config.placeholder_marker.as_str();
                let placeholder = !marker.is_empty() && node.id.contains(marker);
                if placeholder {
                    debug!(node_id = %node.id, "Skipping placeholder node");
                }
                !placeholder
            })
            .filter_map(|node| {
                let validations = Self::check_node(&rules, node);
                (!validations.is_empty()).then(|| ValidationResult {
                    node_id: node.id.clone(),
                    node_type: node.node_type(),
                    node_title: node.title().to_string(),
                    validations,
                })
            })
            .collect()
    }

    fn check_node(rules: &NodeRules<'_, '_>, node: &Node) -> Vec<ValidationFinding> {
        match &node.kind {
            NodeKind::Traffic(payload) => rules.traffic(payload),
            NodeKind::Segment(payload) => rules.segment(node, payload),
            NodeKind::AbTest(payload) => rules.ab_test(node, payload),
            NodeKind::Variant(payload) => rules.variant(payload),
            NodeKind::Note(_) | NodeKind::Form(_) => Vec::new(),
        }
    }
}

/// Node-level findings with the default configuration.
pub fn validate(graph: &Graph, context: &ValidationContext) -> Vec<ValidationResult> {
    Validator::default().validate(graph, context)
}
