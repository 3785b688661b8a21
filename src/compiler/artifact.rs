use crate::error::CompileError;
use crate::graph::{
    AbTestVariant, LandingPageRef, RuleOperator, RuleType, RuleValue, SegmentRule,
    TranslationMode, VariantPayload,
};
use crate::settings::CustomGoal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The runtime routing configuration handed to the edge router.
///
/// A `CompiledConfig` is a plain value: the same graph and settings always produce an
/// equal value and byte-identical JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledConfig {
    pub default_variant_id: Option<LandingPageRef>,
    /// Sorted by priority, highest first. The router takes the first matching segment.
    pub segments: Vec<CleanedSegment>,
    pub session_duration: u32,
    pub attribution_period: u32,
    pub primary_goal: String,
    pub custom_goals: Vec<CustomGoal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedSegment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: f64,
    pub primary_landing_page_id: Option<LandingPageRef>,
    pub rules: Vec<CleanedSegmentRule>,
    pub translation_mode: TranslationMode,
    pub translations: BTreeMap<String, serde_json::Value>,
    pub variants: Vec<CleanedVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedSegmentRule {
    pub id: String,
    pub rule_type: RuleType,
    pub operator: RuleOperator,
    pub value: Option<RuleValue>,
    pub label: String,
    pub is_required: Option<bool>,
}

/// One routable destination inside a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedVariant {
    pub id: String,
    pub name: String,
    pub landing_page_id: Option<LandingPageRef>,
    pub traffic_percentage: Option<f64>,
    pub is_control: bool,
    /// The A/B test node this variant was copied from, if any.
    pub experiment_id: Option<String>,
}

impl From<&SegmentRule> for CleanedSegmentRule {
    fn from(rule: &SegmentRule) -> Self {
        Self {
            id: rule.id.clone(),
            rule_type: rule.rule_type,
            operator: rule.operator,
            value: rule.value.clone(),
            label: rule.label.clone(),
            is_required: rule.is_required,
        }
    }
}

impl CleanedVariant {
    pub(crate) fn from_variant_node(node_id: &str, payload: &VariantPayload) -> Self {
        Self {
            id: node_id.to_string(),
            name: payload.title.clone(),
            landing_page_id: payload.landing_page_id.clone(),
            traffic_percentage: payload.traffic_percentage,
            is_control: false,
            experiment_id: None,
        }
    }

    pub(crate) fn from_ab_test(test_id: &str, variant: &AbTestVariant) -> Self {
        Self {
            id: variant.id.clone(),
            name: variant.name.clone(),
            landing_page_id: variant.landing_page_id.clone(),
            traffic_percentage: Some(variant.traffic_allocation),
            is_control: variant.is_control,
            experiment_id: Some(test_id.to_string()),
        }
    }
}

impl CompiledConfig {
    /// Serializes to the compact JSON the router reads.
    pub fn to_json(&self) -> Result<String, CompileError> {
        serde_json::to_string(self).map_err(|e| CompileError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CompileError> {
        serde_json::to_string_pretty(self).map_err(|e| CompileError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::Serialization(e.to_string()))
    }
}
