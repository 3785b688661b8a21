use super::artifact::{CleanedSegment, CleanedSegmentRule, CleanedVariant};
use crate::graph::{GraphReader, Node, NodeKind, SegmentPayload};
use itertools::Itertools;
use tracing::debug;

/// Projects the reachable part of a graph into runtime records.
///
/// Every value is built bottom-up: a segment's variant list is complete before the
/// segment itself is constructed, and nothing is mutated after construction.
pub(super) struct SegmentProjector<'r, 'a> {
    reader: &'r GraphReader<'a>,
}

impl<'r, 'a> SegmentProjector<'r, 'a> {
    pub(super) fn new(reader: &'r GraphReader<'a>) -> Self {
        Self { reader }
    }

    /// Builds the ordered segment list reachable from `root_id`.
    ///
    /// Segments are sorted by priority, highest first. The sort is stable, so segments
    /// of equal priority keep the order in which their edges were discovered.
    pub(super) fn segments(&self, root_id: &str) -> Vec<CleanedSegment> {
        self.reader
            .targets_of(root_id)
            .filter_map(|node| match &node.kind {
                NodeKind::Segment(payload) => Some(self.segment(node, payload)),
                _ => {
                    debug!(
                        node_id = %node.id,
                        node_type = %node.node_type(),
                        "Ignoring non-segment child of traffic node"
                    );
                    None
                }
            })
            .sorted_by(|a, b| b.priority.total_cmp(&a.priority))
            .collect()
    }

    fn segment(&self, node: &Node, payload: &SegmentPayload) -> CleanedSegment {
        let variants = self
            .reader
            .targets_of(&node.id)
            .flat_map(|child| self.variants_of(child))
            .collect();

        CleanedSegment {
            id: node.id.clone(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            priority: payload.priority,
            primary_landing_page_id: payload.primary_landing_page_id.clone(),
            rules: payload.rules.iter().map(CleanedSegmentRule::from).collect(),
            translation_mode: payload.translation_mode,
            translations: payload.translations.clone(),
            variants,
        }
    }

    /// Runtime variants contributed by one child of a segment.
    fn variants_of(&self, child: &Node) -> Vec<CleanedVariant> {
        match &child.kind {
            NodeKind::AbTest(test) => test
                .variants
                .iter()
                .map(|variant| CleanedVariant::from_ab_test(&child.id, variant))
                .collect(),
            NodeKind::Variant(variant) => {
                vec![CleanedVariant::from_variant_node(&child.id, variant)]
            }
            NodeKind::Traffic(_) | NodeKind::Segment(_) | NodeKind::Note(_) | NodeKind::Form(_) => {
                debug!(
                    node_id = %child.id,
                    node_type = %child.node_type(),
                    "Ignoring segment child with no runtime projection"
                );
                Vec::new()
            }
        }
    }
}
