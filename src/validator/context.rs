use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Facts about the project that the graph alone cannot express.
///
/// The caller fetches these before validating. Deleted landing pages must simply be
/// absent from `landing_pages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    #[serde(default)]
    pub landing_pages: AHashMap<String, LandingPageStatus>,
    /// Whether the campaign type captures leads and therefore needs a form.
    #[serde(default)]
    pub requires_lead_form: bool,
    #[serde(default)]
    pub lead_form: Option<LeadForm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingPageStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub field_count: usize,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, id: impl Into<String>, status: LandingPageStatus) -> Self {
        self.landing_pages.insert(id.into(), status);
        self
    }

    pub fn with_lead_form(mut self, lead_form: Option<LeadForm>) -> Self {
        self.requires_lead_form = true;
        self.lead_form = lead_form;
        self
    }

    pub fn page_status(&self, id: &str) -> Option<LandingPageStatus> {
        self.landing_pages.get(id).copied()
    }

    pub fn has_landing_pages(&self) -> bool {
        !self.landing_pages.is_empty()
    }

    /// False only when a lead form is required and is missing or has no fields.
    pub fn lead_form_is_valid(&self) -> bool {
        !self.requires_lead_form || self.lead_form.is_some_and(|form| form.field_count > 0)
    }
}
