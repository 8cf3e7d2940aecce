//! Input validation and default filling for raw policy facts
//!
//! The normalizer is the only component allowed to reject a request: every
//! later pipeline stage operates on a fully-populated [`PolicyFacts`] and
//! degrades instead of failing.

use crate::error::ValuationError;
use crate::policy::data::{PolicyFacts, PolicyFactsInput, DEFAULT_CURRENCY};

/// Validate raw facts and fill documented defaults. Pure, no side effects.
///
/// Rejections name the offending request field:
/// - `contract_period_years <= 0`
/// - `paid_years < 0` or `paid_years > contract_period_years`
/// - any negative or non-finite premium/value amount
pub fn normalize(input: &PolicyFactsInput) -> Result<PolicyFacts, ValuationError> {
    if input.contract_period_years <= 0 {
        return Err(ValuationError::invalid(
            "contractPeriodYears",
            format!("must be positive, got {}", input.contract_period_years),
        ));
    }
    if input.paid_years < 0 {
        return Err(ValuationError::invalid(
            "paidYears",
            format!("must not be negative, got {}", input.paid_years),
        ));
    }
    if input.paid_years > input.contract_period_years {
        return Err(ValuationError::invalid(
            "paidYears",
            format!(
                "exceeds contract period ({} > {})",
                input.paid_years, input.contract_period_years
            ),
        ));
    }

    check_amount("annualPremium", input.annual_premium)?;
    check_amount("surrenderValue", input.surrender_value)?;
    if let Some(total) = input.total_premium {
        check_amount("totalPremium", total)?;
    }

    let contract_period_years = input.contract_period_years as u32;
    let total_premium = input
        .total_premium
        .unwrap_or(input.annual_premium * contract_period_years as f64);

    Ok(PolicyFacts {
        company: input.company.trim().to_string(),
        product_type: input.product_type.trim().to_string(),
        contract_period_years,
        paid_years: input.paid_years as u32,
        annual_premium: input.annual_premium,
        total_premium,
        surrender_value: input.surrender_value,
        currency: input
            .currency
            .as_deref()
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    })
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if !value.is_finite() {
        return Err(ValuationError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValuationError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
