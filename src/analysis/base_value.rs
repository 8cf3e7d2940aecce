//! Actuarial baseline value from policy facts alone

use crate::policy::PolicyFacts;

/// Fixed discount rate for present-value terms (annual).
pub const DISCOUNT_RATE: f64 = 0.05;

/// Weight of the simple return ratio in the combined value.
const RETURN_WEIGHT: f64 = 0.3;

/// Floor on the baseline as a fraction of surrender value.
const SURRENDER_FLOOR: f64 = 0.8;

/// Compute the baseline value: discounted surrender value plus the
/// discounted premium stream, plus a small weighting on the policy's simple
/// return ratio, floored at [`SURRENDER_FLOOR`] of surrender value so
/// degenerate inputs cannot produce an unreasonably small baseline.
///
/// Pure function of the facts; always >= 0.
pub fn base_value(facts: &PolicyFacts) -> f64 {
    let years = facts.contract_period_years;
    let discount = (1.0 + DISCOUNT_RATE).powi(years as i32);

    let present_value = facts.surrender_value / discount;

    let premium_stream = facts.annual_premium * years as f64;
    let future_value = premium_stream / discount;

    // Simple return ratio over total premium; zero-premium policies carry
    // no return term
    let return_ratio = if facts.total_premium > 0.0 {
        (facts.surrender_value + premium_stream - facts.total_premium) / facts.total_premium
    } else {
        0.0
    };

    let combined = present_value + future_value + return_ratio * facts.total_premium * RETURN_WEIGHT;

    combined.max(facts.surrender_value * SURRENDER_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn facts() -> PolicyFacts {
        PolicyFacts {
            company: "AIA".to_string(),
            product_type: "Savings Plan".to_string(),
            contract_period_years: 10,
            paid_years: 5,
            annual_premium: 3000.0,
            total_premium: 15000.0,
            surrender_value: 12000.0,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_base_value_matches_manual_calculation() {
        let discount = 1.05f64.powi(10);
        let pv = 12000.0 / discount;
        let fv = 30000.0 / discount;
        let ret = (12000.0 + 30000.0 - 15000.0) / 15000.0;
        let expected = pv + fv + ret * 15000.0 * 0.3;

        assert_relative_eq!(base_value(&facts()), expected, epsilon = 1e-9);
        // Well above the surrender floor for this policy
        assert!(base_value(&facts()) > 12000.0 * 0.8);
    }

    #[test]
    fn test_surrender_floor_binds_for_degenerate_inputs() {
        let mut degenerate = facts();
        degenerate.annual_premium = 0.0;
        degenerate.total_premium = 0.0;
        degenerate.contract_period_years = 60;

        // Heavy discounting alone would value this near zero
        assert_relative_eq!(
            base_value(&degenerate),
            degenerate.surrender_value * 0.8,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_surrender_value_is_nonnegative() {
        let mut zero = facts();
        zero.surrender_value = 0.0;
        assert!(base_value(&zero) >= 0.0);
    }

    #[test]
    fn test_worked_example_exceeds_floor_bound() {
        // The AIA worked example: baseline must be at least 9600
        assert!(base_value(&facts()) >= 9600.0);
    }
}
