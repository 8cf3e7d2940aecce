//! Policy data structures for valuation requests

use serde::{Deserialize, Serialize};

/// Currency assumed when the request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Raw policy facts as supplied by the caller or an upstream collaborator.
///
/// Years are signed and `total_premium`/`currency` optional so that malformed
/// or partial input is representable here and rejected (or defaulted) by the
/// normalizer, not by deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFactsInput {
    /// Issuing insurer, e.g. "AIA"
    pub company: String,

    /// Product category, e.g. "Savings Plan", "Whole Life"
    pub product_type: String,

    /// Total contract period in years
    pub contract_period_years: i32,

    /// Years of premium already paid
    pub paid_years: i32,

    /// Annual premium amount
    pub annual_premium: f64,

    /// Total premium paid to date; defaulted to
    /// `annual_premium * contract_period_years` when absent
    #[serde(default)]
    pub total_premium: Option<f64>,

    /// Declared surrender value
    pub surrender_value: f64,

    /// ISO 4217 currency code; defaulted to USD when absent
    #[serde(default)]
    pub currency: Option<String>,
}

/// Fully-populated, validated policy facts.
///
/// Created once per valuation request by the normalizer and immutable for
/// the duration of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFacts {
    /// Issuing insurer
    pub company: String,

    /// Product category
    pub product_type: String,

    /// Total contract period in years (> 0)
    pub contract_period_years: u32,

    /// Years of premium already paid (0..=contract_period_years)
    pub paid_years: u32,

    /// Annual premium amount (>= 0)
    pub annual_premium: f64,

    /// Total premium paid (>= 0)
    pub total_premium: f64,

    /// Declared surrender value (>= 0)
    pub surrender_value: f64,

    /// ISO 4217 currency code
    pub currency: String,
}

impl PolicyFacts {
    /// Remaining payment years on the contract.
    pub fn remaining_years(&self) -> u32 {
        self.contract_period_years - self.paid_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_years() {
        let facts = PolicyFacts {
            company: "AIA".to_string(),
            product_type: "Savings Plan".to_string(),
            contract_period_years: 10,
            paid_years: 5,
            annual_premium: 3000.0,
            total_premium: 15000.0,
            surrender_value: 12000.0,
            currency: "USD".to_string(),
        };
        assert_eq!(facts.remaining_years(), 5);
    }

    #[test]
    fn test_input_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "company": "AIA",
            "productType": "Savings Plan",
            "contractPeriodYears": 10,
            "paidYears": 5,
            "annualPremium": 3000.0,
            "surrenderValue": 12000.0
        }"#;
        let input: PolicyFactsInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.total_premium, None);
        assert_eq!(input.currency, None);
        assert_eq!(input.contract_period_years, 10);
    }
}
