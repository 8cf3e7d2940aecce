//! Property-linked rider analysis
//!
//! Runs only when the policy declares an embedded property-linked rider.
//! The result is an additive value component: the rider is a distinct asset,
//! not a discount on the insurance value itself.

use serde::{Deserialize, Serialize};

/// Discount retained on the 5-year rental stream.
const RENTAL_HAIRCUT: f64 = 0.8;

/// Years of rental income counted.
const RENTAL_YEARS: f64 = 5.0;

/// Share of the property's market value attributed to the policy.
const PROPERTY_VALUE_SHARE: f64 = 0.10;

/// Share of expected appreciation attributed to the policy.
const APPRECIATION_SHARE: f64 = 0.3;

/// Kind of property backing the rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
    Land,
}

impl PropertyType {
    /// Expected annual appreciation rate by property type.
    fn appreciation_rate(&self) -> f64 {
        match self {
            PropertyType::Residential => 0.04,
            PropertyType::Commercial => 0.05,
            PropertyType::Industrial => 0.03,
            PropertyType::Land => 0.06,
        }
    }
}

/// Property-linked rider facts supplied with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateFactors {
    pub property_type: PropertyType,

    /// Free-text location, e.g. "Hong Kong"
    pub location: String,

    /// Appraised market value of the property
    pub market_value: f64,

    /// Gross annual rental yield (decimal)
    pub rental_yield: f64,

    /// Age of the property in years
    pub property_age_years: f64,

    /// Annual maintenance cost
    pub maintenance_cost: f64,

    /// Occupancy rate (decimal)
    pub occupancy_rate: f64,
}

/// Real-estate analysis outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealEstateAnalysis {
    /// Share of property value flowing into the valuation
    pub property_value_contribution: f64,

    /// Discounted 5-year rental stream
    pub rental_income_contribution: f64,

    /// Share of expected appreciation
    pub appreciation_contribution: f64,

    /// Property risk score in [0, 1]
    pub risk_score: f64,

    /// Additive adjustment: summed contributions scaled by risk
    pub adjustment: f64,

    /// Confidence contributed by this analysis
    pub sub_confidence: f64,
}

/// Analyze a property-linked rider into an additive value component.
pub fn analyze(factors: &RealEstateFactors) -> RealEstateAnalysis {
    // Non-finite or negative appraisals carry no value but still produce a
    // well-formed analysis
    let market_value = if factors.market_value.is_finite() {
        factors.market_value.max(0.0)
    } else {
        0.0
    };
    let occupancy = factors.occupancy_rate.clamp(0.0, 1.0);
    let rental_yield = factors.rental_yield.clamp(0.0, 1.0);

    let property_value_contribution = market_value * PROPERTY_VALUE_SHARE;

    let annual_rent = market_value * rental_yield * occupancy;
    let rental_income_contribution = annual_rent * RENTAL_YEARS * RENTAL_HAIRCUT;

    let appreciation_contribution =
        market_value * factors.property_type.appreciation_rate() * APPRECIATION_SHARE;

    let maintenance_drag = if market_value > 0.0 {
        (factors.maintenance_cost.max(0.0) / market_value * 2.0).min(1.0)
    } else {
        1.0
    };
    let age_score = (factors.property_age_years.max(0.0) / 50.0).min(1.0);
    let risk_score = (age_score * 0.4 + (1.0 - occupancy) * 0.4 + maintenance_drag * 0.2)
        .clamp(0.0, 1.0);

    let gross = property_value_contribution + rental_income_contribution + appreciation_contribution;

    RealEstateAnalysis {
        property_value_contribution,
        rental_income_contribution,
        appreciation_contribution,
        risk_score,
        adjustment: gross * (1.0 - 0.2 * risk_score),
        sub_confidence: 1.0 - 0.2 * risk_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn factors() -> RealEstateFactors {
        RealEstateFactors {
            property_type: PropertyType::Residential,
            location: "Hong Kong".to_string(),
            market_value: 1_000_000.0,
            rental_yield: 0.03,
            property_age_years: 10.0,
            maintenance_cost: 5_000.0,
            occupancy_rate: 0.95,
        }
    }

    #[test]
    fn test_contributions_match_documented_shares() {
        let analysis = analyze(&factors());
        assert_relative_eq!(analysis.property_value_contribution, 100_000.0);
        // 1,000,000 * 0.03 * 0.95 rent, five years at the 20% haircut
        assert_relative_eq!(
            analysis.rental_income_contribution,
            1_000_000.0 * 0.03 * 0.95 * 5.0 * 0.8
        );
        assert_relative_eq!(analysis.appreciation_contribution, 1_000_000.0 * 0.04 * 0.3);
    }

    #[test]
    fn test_risk_score_scales_the_adjustment() {
        let analysis = analyze(&factors());
        let gross = analysis.property_value_contribution
            + analysis.rental_income_contribution
            + analysis.appreciation_contribution;
        assert_relative_eq!(analysis.adjustment, gross * (1.0 - 0.2 * analysis.risk_score));
        assert!(analysis.adjustment <= gross);
        assert!(analysis.adjustment >= 0.8 * gross);
    }

    #[test]
    fn test_vacant_old_property_is_riskier() {
        let mut risky = factors();
        risky.property_age_years = 60.0;
        risky.occupancy_rate = 0.3;
        risky.maintenance_cost = 400_000.0;

        let safe = analyze(&factors());
        let stressed = analyze(&risky);
        assert!(stressed.risk_score > safe.risk_score);
        assert!(stressed.sub_confidence < safe.sub_confidence);
    }

    #[test]
    fn test_land_appreciates_fastest() {
        let mut land = factors();
        land.property_type = PropertyType::Land;
        assert!(
            analyze(&land).appreciation_contribution > analyze(&factors()).appreciation_contribution
        );
    }

    #[test]
    fn test_worthless_appraisal_contributes_nothing() {
        let mut broke = factors();
        broke.market_value = f64::NAN;
        let analysis = analyze(&broke);
        assert_eq!(analysis.adjustment, 0.0);
        assert!(analysis.risk_score >= 0.0 && analysis.risk_score <= 1.0);
    }
}
