use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single targeting condition attached to a segment.
///
/// Rules are carried to the router verbatim; nothing in this crate interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRule {
    pub id: String,
    pub rule_type: RuleType,
    pub operator: RuleOperator,
    /// Unset while the rule is still being authored.
    #[serde(default)]
    pub value: Option<RuleValue>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub is_required: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleType {
    Country,
    Region,
    City,
    Device,
    Browser,
    Os,
    Language,
    Referrer,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmTerm,
    UtmContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    GreaterThan,
    LessThan,
    MatchesRegex,
}

/// The comparison operand of a rule.
///
/// Numbers keep the literal they were written with, so `5` stays `5` in compiled output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Number(Number),
    Text(String),
    TextList(Vec<String>),
    NumberList(Vec<Number>),
}

impl SegmentRule {
    pub fn new(
        id: impl Into<String>,
        rule_type: RuleType,
        operator: RuleOperator,
        value: RuleValue,
    ) -> Self {
        Self {
            id: id.into(),
            rule_type,
            operator,
            value: Some(value),
            label: String::new(),
            is_required: None,
        }
    }
}
