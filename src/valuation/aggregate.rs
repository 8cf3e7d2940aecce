//! Final value aggregation
//!
//! The one place where adjustments combine: the four proportional factors
//! multiply the baseline, the two genuine value components (real estate,
//! document nudge) add on top, and the hard floor caps the downside.

use crate::document::DocumentValidation;

/// Hard floor on the final value as a fraction of the baseline.
pub const VALUE_FLOOR: f64 = 0.5;

/// Aggregation outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Final value after flooring, >= 0
    pub final_value: f64,

    /// Additive document-confidence nudge actually applied
    pub document_adjustment: f64,

    /// True when the floor clipped the combined value
    pub floored: bool,
}

/// Small additive nudge from document quality, as a fraction of baseline:
/// a confidence tier bonus/penalty of up to +/-2%, minus 0.5% per missing
/// required field and 1% per validation error.
fn document_adjustment_fraction(validation: &DocumentValidation) -> f64 {
    let tier = if validation.confidence > 0.9 {
        0.02
    } else if validation.confidence > 0.7 {
        0.01
    } else if validation.confidence < 0.5 {
        -0.02
    } else {
        0.0
    };

    tier - validation.missing_fields.len() as f64 * 0.005
        - validation.validation_errors.len() as f64 * 0.01
}

/// Combine baseline and adjustments into the bounded final value.
pub fn aggregate(
    base_value: f64,
    market_factor: f64,
    risk_factor: f64,
    liquidity_factor: f64,
    regulatory_factor: f64,
    real_estate_adjustment: f64,
    document_validation: &DocumentValidation,
) -> Aggregate {
    let document_adjustment = document_adjustment_fraction(document_validation) * base_value;

    let combined = base_value * market_factor * risk_factor * liquidity_factor * regulatory_factor
        + real_estate_adjustment
        + document_adjustment;

    let floor = base_value * VALUE_FLOOR;
    let final_value = combined.max(floor);

    Aggregate {
        final_value,
        document_adjustment,
        floored: combined < floor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{validate, DocumentExtraction};
    use approx::assert_relative_eq;

    fn clean_validation() -> DocumentValidation {
        validate(Some(&DocumentExtraction {
            policy_number: Some("HK12345678".to_string()),
            insured_name: Some("Chan Tai Man".to_string()),
            issue_date: Some("2015-06-01".to_string()),
            maturity_date: Some("2035-06-01".to_string()),
            premium_schedule: Some("annual".to_string()),
            riders: Some("CI".to_string()),
            exclusions: Some("none".to_string()),
            currency: Some("HKD".to_string()),
        }))
    }

    #[test]
    fn test_multiplicative_then_additive_composition() {
        let validation = clean_validation();
        let result = aggregate(10_000.0, 1.02, 0.95, 1.1, 0.97, 500.0, &validation);

        let expected = 10_000.0 * 1.02 * 0.95 * 1.1 * 0.97 + 500.0 + 10_000.0 * 0.02;
        assert_relative_eq!(result.final_value, expected, epsilon = 1e-9);
        assert!(!result.floored);
    }

    #[test]
    fn test_document_tier_bonus_and_penalties() {
        // High-confidence documents: +2% of base
        assert_relative_eq!(
            document_adjustment_fraction(&clean_validation()),
            0.02,
            epsilon = 1e-12
        );

        // Absent extraction: confidence 0 (< 0.5) with four missing fields
        // and one recorded error
        let absent = validate(None);
        assert_relative_eq!(
            document_adjustment_fraction(&absent),
            -0.02 - 4.0 * 0.005 - 0.01,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_floor_clips_pathological_downside() {
        // Large negative document nudge cannot push below half the baseline
        let absent = validate(None);
        let result = aggregate(10_000.0, 0.8, 0.7, 0.6, 0.9, 0.0, &absent);
        assert!(result.final_value >= 5_000.0);

        // This combination actually floors: 0.8*0.7*0.6*0.9 = 0.3024
        assert!(result.floored);
        assert_relative_eq!(result.final_value, 5_000.0);
    }

    #[test]
    fn test_real_estate_is_additive_not_multiplicative() {
        let validation = clean_validation();
        let without = aggregate(10_000.0, 1.0, 1.0, 1.0, 1.0, 0.0, &validation);
        let with = aggregate(10_000.0, 1.0, 1.0, 1.0, 1.0, 2_500.0, &validation);
        assert_relative_eq!(with.final_value - without.final_value, 2_500.0);
    }
}
