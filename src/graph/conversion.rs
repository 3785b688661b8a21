//! The schema boundary between the editor's JSON document and the typed [`Graph`].
use super::definition::{Edge, Graph, Node, NodeKind, NodeType};
use crate::error::GraphParseError;
use ahash::AHashSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait for data models that can be converted into a campaign [`Graph`].
///
/// This is the extension point for feeding graphs from sources other than the editor's
/// JSON document, such as rows loaded from a database.
///
/// # Example
///
/// ```rust,no_run
/// use routegraph::error::GraphParseError;
/// use routegraph::graph::{Graph, IntoGraph, Node, NodeKind, TrafficPayload};
///
/// struct StoredCampaign { entry_id: String, fallback_page: Option<String> }
///
/// impl IntoGraph for StoredCampaign {
///     fn into_graph(self) -> Result<Graph, GraphParseError> {
///         Ok(Graph {
///             nodes: vec![Node::new(
///                 self.entry_id,
///                 NodeKind::Traffic(TrafficPayload { default_variant_id: self.fallback_page }),
///             )],
///             edges: vec![],
///         })
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a verified campaign graph.
    fn into_graph(self) -> Result<Graph, GraphParseError>;
}

/// Editor document as stored by the graph editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default)]
    pub nodes: Vec<EditorNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// A node before its payload has been checked against the schema of its kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorNode {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub node_type: String,
    #[serde(
        default,
        rename = "parentId",
        alias = "parentNode",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
    #[serde(default, alias = "payload")]
    pub data: serde_json::Value,
}

impl IntoGraph for EditorDocument {
    fn into_graph(self) -> Result<Graph, GraphParseError> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| {
                if !seen.insert(raw.id.clone()) {
                    return Err(GraphParseError::DuplicateNodeId(raw.id));
                }
                raw.into_node()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Graph {
            nodes,
            edges: self.edges,
        })
    }
}

impl EditorNode {
    fn into_node(self) -> Result<Node, GraphParseError> {
        let node_type =
            NodeType::parse(&self.node_type).ok_or_else(|| GraphParseError::UnknownNodeKind {
                node_id: self.id.clone(),
                kind: self.node_type.clone(),
            })?;

        let data = match self.data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        let kind = match node_type {
            NodeType::Traffic => NodeKind::Traffic(parse_payload(&self.id, node_type, data)?),
            NodeType::Segment => NodeKind::Segment(parse_payload(&self.id, node_type, data)?),
            NodeType::AbTest => NodeKind::AbTest(parse_payload(&self.id, node_type, data)?),
            NodeType::Variant => NodeKind::Variant(parse_payload(&self.id, node_type, data)?),
            NodeType::Note => NodeKind::Note(parse_payload(&self.id, node_type, data)?),
            NodeType::Form => NodeKind::Form(parse_payload(&self.id, node_type, data)?),
        };

        Ok(Node {
            id: self.id,
            parent_id: self.parent_id,
            kind,
        })
    }
}

fn parse_payload<T: DeserializeOwned>(
    node_id: &str,
    node_type: NodeType,
    data: serde_json::Value,
) -> Result<T, GraphParseError> {
    serde_json::from_value(data).map_err(|e| GraphParseError::InvalidPayload {
        node_id: node_id.to_string(),
        kind: node_type.as_str().to_string(),
        message: e.to_string(),
    })
}

impl From<&Node> for EditorNode {
    fn from(node: &Node) -> Self {
        let data = match &node.kind {
            NodeKind::Traffic(p) => serde_json::to_value(p),
            NodeKind::Segment(p) => serde_json::to_value(p),
            NodeKind::AbTest(p) => serde_json::to_value(p),
            NodeKind::Variant(p) => serde_json::to_value(p),
            NodeKind::Note(p) => serde_json::to_value(p),
            NodeKind::Form(p) => serde_json::to_value(p),
        }
        .unwrap_or(serde_json::Value::Null);

        Self {
            id: node.id.clone(),
            node_type: node.node_type().as_str().to_string(),
            parent_id: node.parent_id.clone(),
            data,
        }
    }
}

impl From<Graph> for EditorDocument {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes.iter().map(EditorNode::from).collect(),
            edges: graph.edges,
        }
    }
}

impl TryFrom<EditorDocument> for Graph {
    type Error = GraphParseError;

    fn try_from(document: EditorDocument) -> Result<Self, Self::Error> {
        document.into_graph()
    }
}

impl Graph {
    /// Parses and schema-checks an editor JSON document.
    pub fn from_json(json: &str) -> Result<Self, GraphParseError> {
        let document: EditorDocument =
            serde_json::from_str(json).map_err(|e| GraphParseError::Json(e.to_string()))?;
        document.into_graph()
    }

    pub fn to_json(&self) -> Result<String, GraphParseError> {
        serde_json::to_string(self).map_err(|e| GraphParseError::Json(e.to_string()))
    }
}
