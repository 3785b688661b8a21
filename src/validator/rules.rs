use super::context::{LandingPageStatus, ValidationContext};
use super::finding::ValidationFinding;
use super::tolerance::{AB_ALLOCATION_TOLERANCE, VARIANT_SPLIT_TOLERANCE, sums_to_hundred};
use crate::config::ValidationConfig;
use crate::graph::{
    AbTestPayload, GraphReader, Node, NodeKind, SegmentPayload, TrafficPayload, VariantPayload,
};

/// Per-kind node checks sharing one indexed graph and one context.
pub(super) struct NodeRules<'r, 'a> {
    pub(super) reader: &'r GraphReader<'a>,
    pub(super) context: &'r ValidationContext,
    pub(super) config: &'r ValidationConfig,
}

impl NodeRules<'_, '_> {
    pub(super) fn traffic(&self, payload: &TrafficPayload) -> Vec<ValidationFinding> {
        const FIELD: &str = "defaultVariantId";

        let finding = match assigned(payload.default_variant_id.as_deref()) {
            None if self.context.has_landing_pages() => Some(
                ValidationFinding::error(
                    "traffic-missing-default",
                    "Select a default landing page for visitors who match no segment",
                )
                .with_field(FIELD),
            ),
            None if !self.context.lead_form_is_valid() => Some(
                ValidationFinding::error(
                    "traffic-lead-form-incomplete",
                    "Finish the lead capture form before creating a default landing page",
                )
                .with_field(FIELD),
            ),
            None => Some(
                ValidationFinding::error(
                    "traffic-no-landing-pages",
                    "Create a landing page to use as the default destination",
                )
                .with_field(FIELD),
            ),
            Some(page_id) => self.referenced_page("traffic", "default landing page", page_id, FIELD),
        };
        finding.into_iter().collect()
    }

    pub(super) fn segment(&self, node: &Node, payload: &SegmentPayload) -> Vec<ValidationFinding> {
        let mut findings: Vec<_> = self
            .landing_page(
                "segment",
                "landing page",
                payload.primary_landing_page_id.as_deref(),
                "primaryLandingPageId",
            )
            .into_iter()
            .collect();

        if payload.rules.is_empty() {
            findings.push(
                ValidationFinding::info(
                    "segment-no-rules",
                    "This segment has no targeting rules and will match every visitor",
                )
                .with_field("rules"),
            );
        }

        let routed: Vec<&VariantPayload> = self
            .reader
            .targets_of(&node.id)
            .filter_map(|child| match &child.kind {
                NodeKind::Variant(variant) => Some(variant),
                _ => None,
            })
            .collect();
        if !routed.is_empty() {
            let total = traffic_sum(routed.iter().copied());
            if !sums_to_hundred(total, VARIANT_SPLIT_TOLERANCE) {
                findings.push(ValidationFinding::error(
                    "segment-variant-split",
                    format!(
                        "Variant traffic in this segment adds up to {}%, it must add up to 100%",
                        format_percent(total)
                    ),
                ));
            }
        }

        findings
    }

    pub(super) fn ab_test(&self, node: &Node, payload: &AbTestPayload) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        // Variant nodes owned through `parent_id` are authoritative over `payload.variants`.
        let connected: Vec<&VariantPayload> = self
            .reader
            .children_of(&node.id)
            .iter()
            .filter_map(|child| match &child.kind {
                NodeKind::Variant(variant) => Some(variant),
                _ => None,
            })
            .collect();

        if connected.len() < 2 {
            findings.push(ValidationFinding::error(
                "ab-test-min-variants",
                format!(
                    "An A/B test needs at least 2 variants, found {}",
                    connected.len()
                ),
            ));
        }

        if payload.hypothesis.trim().chars().count() <= self.config.min_hypothesis_chars {
            findings.push(
                ValidationFinding::warning(
                    "ab-test-weak-hypothesis",
                    "Describe what you expect this test to show",
                )
                .with_field("hypothesis"),
            );
        }

        if payload
            .primary_metric
            .as_deref()
            .is_none_or(|metric| metric.trim().is_empty())
        {
            findings.push(
                ValidationFinding::error(
                    "ab-test-missing-metric",
                    "Choose the primary metric this test is judged on",
                )
                .with_field("primaryMetric"),
            );
        }

        if !connected.is_empty() {
            let total = traffic_sum(connected.iter().copied());
            if !sums_to_hundred(total, VARIANT_SPLIT_TOLERANCE) {
                findings.push(ValidationFinding::error(
                    "ab-test-traffic-split",
                    format!(
                        "Variant traffic adds up to {}%, it must add up to 100%",
                        format_percent(total)
                    ),
                ));
            }
        }

        if !payload.variants.is_empty() {
            let total: f64 = payload.variants.iter().map(|v| v.traffic_allocation).sum();
            if !sums_to_hundred(total, AB_ALLOCATION_TOLERANCE) {
                findings.push(
                    ValidationFinding::error(
                        "ab-test-allocation-sum",
                        format!(
                            "Test allocations add up to {}%, they must add up to 100%",
                            format_percent(total)
                        ),
                    )
                    .with_field("variants"),
                );
            }
        }

        if !payload
            .completion_criteria
            .as_ref()
            .is_some_and(|criteria| criteria.is_set())
        {
            findings.push(
                ValidationFinding::warning(
                    "ab-test-no-completion-criteria",
                    "Set a sample size or duration so the test knows when to stop",
                )
                .with_field("completionCriteria"),
            );
        }

        findings
    }

    pub(super) fn variant(&self, payload: &VariantPayload) -> Vec<ValidationFinding> {
        let mut findings: Vec<_> = self
            .landing_page(
                "variant",
                "landing page",
                payload.landing_page_id.as_deref(),
                "landingPageId",
            )
            .into_iter()
            .collect();

        let message = match payload.traffic_percentage {
            None => Some("Set the share of traffic this variant receives".to_string()),
            Some(pct) if !(0.0..=100.0).contains(&pct) => Some(format!(
                "Traffic percentage must be between 0 and 100, got {}",
                format_percent(pct)
            )),
            Some(_) => None,
        };
        if let Some(message) = message {
            findings.push(
                ValidationFinding::error("variant-invalid-traffic", message)
                    .with_field("trafficPercentage"),
            );
        }

        findings
    }

    /// Missing, deleted or unpublished landing page check shared by segments and variants.
    fn landing_page(
        &self,
        prefix: &str,
        subject: &str,
        page_id: Option<&str>,
        field: &str,
    ) -> Option<ValidationFinding> {
        match assigned(page_id) {
            None => Some(
                ValidationFinding::error(
                    &format!("{}-missing-landing-page", prefix),
                    format!("Select a {}", subject),
                )
                .with_field(field),
            ),
            Some(page_id) => self.referenced_page(prefix, subject, page_id, field),
        }
    }

    fn referenced_page(
        &self,
        prefix: &str,
        subject: &str,
        page_id: &str,
        field: &str,
    ) -> Option<ValidationFinding> {
        match self.context.page_status(page_id) {
            None => Some(
                ValidationFinding::error(
                    &format!("{}-landing-page-deleted", prefix),
                    format!("The selected {} no longer exists", subject),
                )
                .with_field(field),
            ),
            Some(LandingPageStatus::Published) => None,
            Some(_) => Some(
                ValidationFinding::error(
                    &format!("{}-landing-page-unpublished", prefix),
                    format!("Publish the selected {} first", subject),
                )
                .with_field(field),
            ),
        }
    }
}

/// A landing page reference, with blank ids treated as unset.
fn assigned(page_id: Option<&str>) -> Option<&str> {
    page_id.filter(|id| !id.trim().is_empty())
}

/// Sum of traffic percentages; unset percentages count as zero.
fn traffic_sum<'v>(variants: impl Iterator<Item = &'v VariantPayload>) -> f64 {
    variants.filter_map(|v| v.traffic_percentage).sum()
}

/// Formats a percentage without float noise, e.g. `90` or `100.19`.
fn format_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
