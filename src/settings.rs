use serde::{Deserialize, Serialize};

/// Campaign-level settings. The compiler copies these into the output unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSettings {
    /// Visitor session length, in minutes.
    #[serde(default)]
    pub session_duration: u32,
    /// Conversion attribution window, in days.
    #[serde(default)]
    pub attribution_period: u32,
    #[serde(default)]
    pub primary_goal: String,
    #[serde(default)]
    pub custom_goals: Vec<CustomGoal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGoal {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub goal_type: String,
    #[serde(default)]
    pub target: Option<String>,
}
