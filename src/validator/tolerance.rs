//! Percentage-sum tolerances.
//!
//! A/B payload allocations are checked at ±0.01 and plain variant splits at ±0.2.
//! Whether the looser variant bound is deliberate is unresolved, so the two stay separate.

/// Allowed drift of an A/B test's payload allocations from 100%.
pub const AB_ALLOCATION_TOLERANCE: f64 = 0.01;

/// Allowed drift of sibling variant traffic percentages from 100%.
pub const VARIANT_SPLIT_TOLERANCE: f64 = 0.2;

/// Absorbs binary rounding so that e.g. `50.0 + 50.01` still counts as exactly 100.01.
const FLOAT_SLACK: f64 = 1e-9;

/// True when `sum` lies within `tolerance` of 100, bounds included.
pub fn sums_to_hundred(sum: f64, tolerance: f64) -> bool {
    (sum - 100.0).abs() <= tolerance + FLOAT_SLACK
}
