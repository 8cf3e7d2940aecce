//! Multi-factor risk assessment
//!
//! Combines rating-table scores with market and product risk into the five
//! reported risk factors, a composite risk, and the multiplicative risk
//! adjustment. Strength and performance are goodness scores; they enter the
//! composite inverted so that higher composite always means more risk.

use serde::{Deserialize, Serialize};

use crate::analysis::liquidity::product_liquidity_score;
use crate::analysis::regulatory::product_regulatory_risk;
use crate::policy::PolicyFacts;
use crate::rating::{RatingEntry, NEUTRAL_COMPANY_STRENGTH, NEUTRAL_PRODUCT_PERFORMANCE};

/// Floor on the multiplicative risk adjustment.
const ADJUSTMENT_FLOOR: f64 = 0.7;

/// The five reported risk factor scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    /// Issuer financial strength (higher is better)
    pub company_strength: f64,

    /// Historical product performance (higher is better)
    pub product_performance: f64,

    /// Market volatility score (higher is riskier)
    pub market_volatility: f64,

    /// Regulatory risk score (higher is riskier)
    pub regulatory_risk: f64,

    /// Liquidity risk score (higher is riskier)
    pub liquidity_risk: f64,
}

/// Risk assessment outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub factors: RiskFactors,

    /// Mean of the five factors as risk terms, in [0, 1]
    pub composite: f64,

    /// Multiplicative adjustment `max(1 - composite * 0.2, 0.7)`
    pub adjustment: f64,

    /// True when the rating lookup fell back to neutral defaults
    pub rating_degraded: bool,
}

/// Assess risk from the rating lookup, the volatility score computed by the
/// market analyzer, and the product risk tables.
pub fn assess(facts: &PolicyFacts, rating: &RatingEntry, volatility_score: f64) -> RiskAssessment {
    let rating_degraded = rating.company_strength.is_none();

    let factors = RiskFactors {
        company_strength: rating
            .company_strength
            .unwrap_or(NEUTRAL_COMPANY_STRENGTH)
            .clamp(0.0, 1.0),
        product_performance: rating
            .product_performance
            .unwrap_or(NEUTRAL_PRODUCT_PERFORMANCE)
            .clamp(0.0, 1.0),
        market_volatility: volatility_score.clamp(0.0, 1.0),
        regulatory_risk: product_regulatory_risk(&facts.product_type),
        liquidity_risk: 1.0 - product_liquidity_score(&facts.product_type),
    };

    let composite = ((1.0 - factors.company_strength)
        + (1.0 - factors.product_performance)
        + factors.market_volatility
        + factors.regulatory_risk
        + factors.liquidity_risk)
        / 5.0;

    RiskAssessment {
        factors,
        composite,
        adjustment: (1.0 - composite * 0.2).max(ADJUSTMENT_FLOOR),
        rating_degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn facts(product: &str) -> PolicyFacts {
        PolicyFacts {
            company: "AIA".to_string(),
            product_type: product.to_string(),
            contract_period_years: 10,
            paid_years: 5,
            annual_premium: 3000.0,
            total_premium: 15000.0,
            surrender_value: 12000.0,
            currency: "USD".to_string(),
        }
    }

    fn known_rating() -> RatingEntry {
        RatingEntry {
            company_strength: Some(0.923),
            product_performance: Some(0.65),
        }
    }

    #[test]
    fn test_composite_is_mean_of_risk_terms() {
        let assessment = assess(&facts("Savings Plan"), &known_rating(), 0.5);
        let f = assessment.factors;
        let expected = ((1.0 - f.company_strength)
            + (1.0 - f.product_performance)
            + f.market_volatility
            + f.regulatory_risk
            + f.liquidity_risk)
            / 5.0;
        assert_relative_eq!(assessment.composite, expected);
        assert!(assessment.composite >= 0.0 && assessment.composite <= 1.0);
        assert!(!assessment.rating_degraded);
    }

    #[test]
    fn test_stronger_company_means_lower_composite() {
        let weak = RatingEntry {
            company_strength: Some(0.4),
            product_performance: Some(0.65),
        };
        let strong = assess(&facts("Savings Plan"), &known_rating(), 0.5);
        let weaker = assess(&facts("Savings Plan"), &weak, 0.5);
        assert!(strong.composite < weaker.composite);
        assert!(strong.adjustment >= weaker.adjustment);
    }

    #[test]
    fn test_unknown_rating_uses_neutral_defaults_and_flags() {
        let assessment = assess(&facts("Savings Plan"), &RatingEntry::default(), 0.5);
        assert!(assessment.rating_degraded);
        assert_eq!(assessment.factors.company_strength, NEUTRAL_COMPANY_STRENGTH);
        assert_eq!(
            assessment.factors.product_performance,
            NEUTRAL_PRODUCT_PERFORMANCE
        );
    }

    #[test]
    fn test_adjustment_floor() {
        let worst = RatingEntry {
            company_strength: Some(0.0),
            product_performance: Some(0.0),
        };
        let assessment = assess(&facts("Annuity"), &worst, 1.0);
        assert!(assessment.adjustment >= 0.7);
        // 1 - 0.2 * composite can never drop below 0.8 mathematically, but
        // the documented floor still holds
        assert_relative_eq!(assessment.adjustment, 1.0 - assessment.composite * 0.2);
    }

    #[test]
    fn test_out_of_range_table_scores_are_clamped() {
        let wild = RatingEntry {
            company_strength: Some(1.7),
            product_performance: Some(-0.2),
        };
        let assessment = assess(&facts("Savings Plan"), &wild, 2.0);
        assert_eq!(assessment.factors.company_strength, 1.0);
        assert_eq!(assessment.factors.product_performance, 0.0);
        assert_eq!(assessment.factors.market_volatility, 1.0);
    }
}
