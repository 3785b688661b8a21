use super::definition::{Edge, Graph, Node, NodeKind};
use super::payload::TrafficPayload;
use crate::error::GraphStructureError;
use ahash::AHashMap;

/// The campaign's entry point together with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootNode<'a> {
    pub node: &'a Node,
    pub payload: &'a TrafficPayload,
}

/// Read-only, indexed view over a [`Graph`].
///
/// All indexes are built once in [`GraphReader::new`], so every lookup afterwards is
/// constant time and a full walk stays linear in nodes plus edges.
pub struct GraphReader<'a> {
    graph: &'a Graph,
    by_id: AHashMap<&'a str, &'a Node>,
    out_edges: AHashMap<&'a str, Vec<&'a Edge>>,
    children: AHashMap<&'a str, Vec<&'a Node>>,
}

impl<'a> GraphReader<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let mut by_id = AHashMap::with_capacity(graph.nodes.len());
        let mut children: AHashMap<&'a str, Vec<&'a Node>> = AHashMap::new();
        for node in &graph.nodes {
            // First occurrence wins for duplicate ids.
            by_id.entry(node.id.as_str()).or_insert(node);
            if let Some(parent) = &node.parent_id {
                children.entry(parent.as_str()).or_default().push(node);
            }
        }

        let mut out_edges: AHashMap<&'a str, Vec<&'a Edge>> = AHashMap::new();
        for edge in &graph.edges {
            out_edges
                .entry(edge.source_node_id.as_str())
                .or_default()
                .push(edge);
        }

        Self {
            graph,
            by_id,
            out_edges,
            children,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Locates the unique traffic node.
    pub fn find_root(&self) -> Result<RootNode<'a>, GraphStructureError> {
        let mut roots = self.graph.nodes.iter().filter_map(|node| match &node.kind {
            NodeKind::Traffic(payload) => Some(RootNode { node, payload }),
            _ => None,
        });

        match (roots.next(), roots.next()) {
            (None, _) => Err(GraphStructureError::MissingTrafficNode),
            (Some(root), None) => Ok(root),
            (Some(first), Some(second)) => {
                let ids = [first, second]
                    .into_iter()
                    .chain(roots)
                    .map(|r| r.node.id.clone())
                    .collect();
                Err(GraphStructureError::MultipleTrafficNodes { ids })
            }
        }
    }

    /// Edges leaving `node_id`, in original edge order.
    pub fn out_edges(&self, node_id: &str) -> &[&'a Edge] {
        self.out_edges
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn resolve(&self, node_id: &str) -> Option<&'a Node> {
        self.by_id.get(node_id).copied()
    }

    /// Resolved targets of the edges leaving `node_id`. Dangling edges are skipped.
    pub fn targets_of<'s>(&'s self, node_id: &str) -> impl Iterator<Item = &'a Node> + 's {
        self.out_edges(node_id).iter().filter_map(move |edge| {
            let target = self.resolve(&edge.target_node_id);
            if target.is_none() {
                tracing::debug!(
                    edge_id = %edge.id,
                    target = %edge.target_node_id,
                    "Skipping edge to unknown node"
                );
            }
            target
        })
    }

    /// Nodes whose `parent_id` is `parent_id`, in node order.
    pub fn children_of(&self, parent_id: &str) -> &[&'a Node] {
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::payload::{SegmentPayload, TrafficPayload, VariantPayload};

    fn traffic(id: &str) -> Node {
        Node::new(id, NodeKind::Traffic(TrafficPayload::default()))
    }

    fn segment(id: &str) -> Node {
        Node::new(id, NodeKind::Segment(SegmentPayload::default()))
    }

    #[test]
    fn out_edges_keep_original_order() {
        let graph = Graph {
            nodes: vec![traffic("t"), segment("b"), segment("a"), segment("c")],
            edges: vec![
                Edge::new("e1", "t", "b"),
                Edge::new("e2", "a", "c"),
                Edge::new("e3", "t", "a"),
                Edge::new("e4", "t", "c"),
            ],
        };
        let reader = GraphReader::new(&graph);
        let ids: Vec<_> = reader.out_edges("t").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3", "e4"]);
        assert!(reader.out_edges("missing").is_empty());
    }

    #[test]
    fn targets_skip_dangling_edges() {
        let graph = Graph {
            nodes: vec![traffic("t"), segment("s")],
            edges: vec![Edge::new("e1", "t", "ghost"), Edge::new("e2", "t", "s")],
        };
        let reader = GraphReader::new(&graph);
        let targets: Vec<_> = reader.targets_of("t").map(|n| n.id.as_str()).collect();
        assert_eq!(targets, vec!["s"]);
    }

    #[test]
    fn root_must_be_unique() {
        let empty = Graph::default();
        assert_eq!(
            GraphReader::new(&empty).find_root(),
            Err(GraphStructureError::MissingTrafficNode)
        );

        let two = Graph {
            nodes: vec![traffic("t1"), segment("s"), traffic("t2")],
            edges: vec![],
        };
        assert_eq!(
            GraphReader::new(&two).find_root(),
            Err(GraphStructureError::MultipleTrafficNodes {
                ids: vec!["t1".to_string(), "t2".to_string()]
            })
        );

        let one = Graph {
            nodes: vec![segment("s"), traffic("t")],
            edges: vec![],
        };
        assert_eq!(GraphReader::new(&one).find_root().map(|r| r.node.id.as_str()), Ok("t"));
    }

    #[test]
    fn children_are_indexed_by_parent() {
        let variant = |id: &str| Node::new(id, NodeKind::Variant(VariantPayload::default()));
        let graph = Graph {
            nodes: vec![
                variant("v1").with_parent("ab"),
                variant("v2"),
                variant("v3").with_parent("ab"),
            ],
            edges: vec![],
        };
        let reader = GraphReader::new(&graph);
        let ids: Vec<_> = reader.children_of("ab").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
    }
}
