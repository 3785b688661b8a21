use super::context::ValidationContext;
use super::finding::ValidationFinding;
use crate::graph::GraphReader;

pub const LEAD_FORM_PRIORITY: u32 = 1;
pub const LANDING_PAGES_PRIORITY: u32 = 2;
pub const TRAFFIC_SOURCE_PRIORITY: u32 = 3;

/// Campaign-level blockers, returned sorted by priority.
///
/// The landing page check only runs once the lead form check has passed, so the most
/// fundamental problem is the one reported.
pub(super) fn campaign_findings(
    reader: &GraphReader<'_>,
    context: &ValidationContext,
) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    if context.requires_lead_form {
        match context.lead_form {
            None => findings.push(
                ValidationFinding::error(
                    "lead-form-missing",
                    "This campaign collects leads but has no lead capture form",
                )
                .with_priority(LEAD_FORM_PRIORITY),
            ),
            Some(form) if form.field_count == 0 => findings.push(
                ValidationFinding::error(
                    "lead-form-empty",
                    "Add at least one field to the lead capture form",
                )
                .with_priority(LEAD_FORM_PRIORITY),
            ),
            Some(_) => {}
        }
    }

    if findings.is_empty() && !context.has_landing_pages() {
        findings.push(
            ValidationFinding::error(
                "no-landing-pages",
                "Create at least one landing page before publishing",
            )
            .with_priority(LANDING_PAGES_PRIORITY),
        );
    }

    if let Err(err) = reader.find_root() {
        findings.push(
            ValidationFinding::error("traffic-source-count", err.to_string())
                .with_priority(TRAFFIC_SOURCE_PRIORITY),
        );
    }

    findings
}
