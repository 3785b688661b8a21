//! Common test utilities for building campaign graphs and contexts.
use async_trait::async_trait;
use routegraph::error::StoreError;
use routegraph::graph::{
    AbTestPayload, AbTestVariant, CompletionCriteria, NotePayload, SegmentPayload,
    TrafficPayload, VariantPayload,
};
use routegraph::prelude::*;
use routegraph::publish::MemoryStore;
use std::collections::HashSet;

#[allow(dead_code)]
pub fn traffic(id: &str, default_page: Option<&str>) -> Node {
    Node::new(
        id,
        NodeKind::Traffic(TrafficPayload {
            default_variant_id: default_page.map(str::to_string),
        }),
    )
}

/// A segment with one country rule and a primary landing page.
#[allow(dead_code)]
pub fn segment(id: &str, priority: i32, page: Option<&str>) -> Node {
    Node::new(
        id,
        NodeKind::Segment(SegmentPayload {
            title: format!("Segment {}", id),
            description: String::new(),
            priority: f64::from(priority),
            primary_landing_page_id: page.map(str::to_string),
            rules: vec![SegmentRule::new(
                format!("{}-rule", id),
                RuleType::Country,
                RuleOperator::Equals,
                RuleValue::Text("DE".to_string()),
            )],
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn variant(id: &str, page: Option<&str>, traffic_percentage: Option<f64>) -> Node {
    Node::new(
        id,
        NodeKind::Variant(VariantPayload {
            title: format!("Variant {}", id),
            landing_page_id: page.map(str::to_string),
            traffic_percentage,
        }),
    )
}

/// A fully configured A/B test whose payload allocations are given by `allocations`.
#[allow(dead_code)]
pub fn ab_test(id: &str, allocations: &[f64]) -> Node {
    Node::new(
        id,
        NodeKind::AbTest(AbTestPayload {
            title: format!("Test {}", id),
            hypothesis: "Shorter headlines raise sign-ups on mobile".to_string(),
            primary_metric: Some("signup".to_string()),
            completion_criteria: Some(CompletionCriteria {
                min_sample_size: Some(1_000),
                ..Default::default()
            }),
            variants: allocations
                .iter()
                .enumerate()
                .map(|(i, allocation)| AbTestVariant {
                    id: format!("{}-v{}", id, i),
                    name: format!("Arm {}", i),
                    landing_page_id: Some("lp-1".to_string()),
                    traffic_allocation: *allocation,
                    is_control: i == 0,
                })
                .collect(),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn note(id: &str) -> Node {
    Node::new(
        id,
        NodeKind::Note(NotePayload {
            text: "remember to check copy".to_string(),
        }),
    )
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> Edge {
    Edge::new(format!("{}->{}", source, target), source, target)
}

/// Context in which the given landing pages exist and are published.
#[allow(dead_code)]
pub fn published(pages: &[&str]) -> ValidationContext {
    pages.iter().fold(ValidationContext::new(), |ctx, page| {
        ctx.with_page(*page, LandingPageStatus::Published)
    })
}

#[allow(dead_code)]
pub fn sample_settings() -> CampaignSettings {
    CampaignSettings {
        session_duration: 30,
        attribution_period: 7,
        primary_goal: "signup".to_string(),
        custom_goals: vec![CustomGoal {
            id: "g1".to_string(),
            name: "Pricing visit".to_string(),
            goal_type: "pageview".to_string(),
            target: Some("/pricing".to_string()),
        }],
    }
}

/// traffic -> segment -> variant(100%), every reference published.
#[allow(dead_code)]
pub fn create_valid_graph() -> Graph {
    Graph {
        nodes: vec![
            traffic("traffic", Some("lp-1")),
            segment("seg-de", 10, Some("lp-1")),
            variant("var-a", Some("lp-2"), Some(100.0)),
        ],
        edges: vec![edge("traffic", "seg-de"), edge("seg-de", "var-a")],
    }
}

#[allow(dead_code)]
pub fn finding_ids(results: &[ValidationResult]) -> Vec<String> {
    results
        .iter()
        .flat_map(|r| r.validations.iter().map(|f| f.id.clone()))
        .collect()
}

/// A store that rejects writes to a fixed set of keys and records the rest.
#[allow(dead_code)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub failing: HashSet<String>,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ConfigStore for FlakyStore {
    async fn put(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        if self.failing.contains(key) {
            return Err(StoreError::Unavailable(format!("{} is read-only", key)));
        }
        self.inner.put(key, value).await
    }
}
