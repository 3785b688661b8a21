use super::conversion::EditorDocument;
use super::payload::{
    AbTestPayload, FormPayload, NotePayload, SegmentPayload, TrafficPayload, VariantPayload,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete campaign graph as authored in the editor.
///
/// A `Graph` is read-only input for a single compile or validate call. Its serde
/// representation is the editor document format; deserializing it runs the schema
/// checks in [`crate::graph::conversion`], so every `Graph` value holds verified payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EditorDocument", into = "EditorDocument")]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A single node of the campaign graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// Owning node. Links a variant to the A/B test it belongs to.
    pub parent_id: Option<String>,
    pub kind: NodeKind,
}

/// The closed set of node kinds, each carrying its own payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Traffic(TrafficPayload),
    Segment(SegmentPayload),
    AbTest(AbTestPayload),
    Variant(VariantPayload),
    Note(NotePayload),
    Form(FormPayload),
}

/// Payload-free discriminant of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    Traffic,
    Segment,
    AbTest,
    Variant,
    Note,
    Form,
}

/// A directed "routes-to" connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    #[serde(rename = "source", alias = "sourceNodeId")]
    pub source_node_id: String,
    #[serde(rename = "target", alias = "targetNodeId")]
    pub target_node_id: String,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            kind,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Human readable title used in validation output.
    pub fn title(&self) -> &str {
        match &self.kind {
            NodeKind::Traffic(_) => "Traffic",
            NodeKind::Segment(p) => &p.title,
            NodeKind::AbTest(p) => &p.title,
            NodeKind::Variant(p) => &p.title,
            NodeKind::Note(_) => "Note",
            NodeKind::Form(p) => &p.title,
        }
    }
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Traffic(_) => NodeType::Traffic,
            NodeKind::Segment(_) => NodeType::Segment,
            NodeKind::AbTest(_) => NodeType::AbTest,
            NodeKind::Variant(_) => NodeType::Variant,
            NodeKind::Note(_) => NodeType::Note,
            NodeKind::Form(_) => NodeType::Form,
        }
    }
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Traffic => "traffic",
            NodeType::Segment => "segment",
            NodeType::AbTest => "ab-test",
            NodeType::Variant => "variant",
            NodeType::Note => "note",
            NodeType::Form => "form",
        }
    }

    /// Parses the editor's type tag. Accepts the camelCase spelling older editors emit.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "traffic" => Some(NodeType::Traffic),
            "segment" => Some(NodeType::Segment),
            "ab-test" | "abTest" | "ab_test" => Some(NodeType::AbTest),
            "variant" => Some(NodeType::Variant),
            "note" => Some(NodeType::Note),
            "form" => Some(NodeType::Form),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_node_id: source_node_id.into(),
            target_node_id: target_node_id.into(),
        }
    }
}
