//! Kind-specific node payloads, in the editor's camelCase JSON shape.
use super::rule::SegmentRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a landing page owned by the project.
pub type LandingPageRef = String;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPayload {
    /// Fallback destination when no segment matches.
    #[serde(default)]
    pub default_variant_id: Option<LandingPageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Higher priorities are evaluated first by the router. Fractional values are allowed.
    #[serde(default)]
    pub priority: f64,
    #[serde(default)]
    pub primary_landing_page_id: Option<LandingPageRef>,
    #[serde(default)]
    pub rules: Vec<SegmentRule>,
    #[serde(default)]
    pub translation_mode: TranslationMode,
    /// Locale to translation payload. Ordered so compiled output is deterministic.
    #[serde(default)]
    pub translations: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    #[default]
    None,
    Auto,
    Manual,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub hypothesis: String,
    #[serde(default)]
    pub status: AbTestStatus,
    #[serde(default)]
    pub primary_metric: Option<String>,
    #[serde(default)]
    pub completion_criteria: Option<CompletionCriteria>,
    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
    #[serde(default = "default_pooling_percent")]
    pub pooling_percent: f64,
    #[serde(default)]
    pub variants: Vec<AbTestVariant>,
    #[serde(default)]
    pub winner: Option<String>,
}

fn default_pooling_percent() -> f64 {
    20.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbTestStatus {
    #[default]
    Draft,
    Running,
    Paused,
    Completed,
}

/// Statistical confidence required before a winner may be declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConfidenceLevel {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            90 => Ok(ConfidenceLevel::Ninety),
            95 => Ok(ConfidenceLevel::NinetyFive),
            99 => Ok(ConfidenceLevel::NinetyNine),
            other => Err(format!(
                "confidence level must be 90, 95 or 99, got {}",
                other
            )),
        }
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> Self {
        match level {
            ConfidenceLevel::Ninety => 90,
            ConfidenceLevel::NinetyFive => 95,
            ConfidenceLevel::NinetyNine => 99,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCriteria {
    #[serde(default)]
    pub min_sample_size: Option<u64>,
    #[serde(default)]
    pub min_duration_days: Option<u32>,
    #[serde(default)]
    pub max_duration_days: Option<u32>,
}

impl CompletionCriteria {
    /// True when at least one stopping condition has been configured.
    pub fn is_set(&self) -> bool {
        self.min_sample_size.is_some()
            || self.min_duration_days.is_some()
            || self.max_duration_days.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestVariant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub landing_page_id: Option<LandingPageRef>,
    /// Share of the test's traffic, 0 to 100.
    #[serde(default)]
    pub traffic_allocation: f64,
    #[serde(default)]
    pub is_control: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub landing_page_id: Option<LandingPageRef>,
    #[serde(default)]
    pub traffic_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub title: String,
}
