//! Rule-based recommendation generation
//!
//! Pure threshold checks over the component outputs, evaluated in a fixed
//! order so the recommendation set is deterministic and order-stable for
//! identical inputs.

use serde::{Deserialize, Serialize};

use crate::analysis::{LiquidityAnalysis, RealEstateAnalysis, RegulatoryAnalysis, RiskAssessment};
use crate::document::DocumentValidation;
use crate::policy::PolicyFacts;

/// Categorized guidance attached to a valuation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub risk_mitigation: Vec<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty()
            && self.short_term.is_empty()
            && self.long_term.is_empty()
            && self.risk_mitigation.is_empty()
    }
}

/// Everything the rule set looks at.
pub struct RecommendationContext<'a> {
    pub facts: &'a PolicyFacts,
    pub document: &'a DocumentValidation,
    pub risk: &'a RiskAssessment,
    pub liquidity: &'a LiquidityAnalysis,
    pub regulatory: &'a RegulatoryAnalysis,
    pub real_estate: Option<&'a RealEstateAnalysis>,
    pub market_degraded: bool,
}

/// Evaluate the rule set.
pub fn generate(ctx: &RecommendationContext<'_>) -> Recommendations {
    let mut recs = Recommendations::default();

    if ctx.document.confidence < 0.7 {
        recs.immediate
            .push("Rescan the policy document to improve extraction accuracy".to_string());
    }
    if !ctx.document.missing_fields.is_empty() {
        recs.immediate.push(format!(
            "Supply the missing policy fields manually: {}",
            ctx.document.missing_fields.join(", ")
        ));
    }
    if ctx.market_degraded {
        recs.immediate
            .push("Re-run the valuation when live market data is available".to_string());
    }

    if ctx.risk.composite > 0.6 {
        recs.risk_mitigation
            .push("High-risk product: perform additional due diligence before pricing".to_string());
    }
    if ctx.risk.composite > 0.7 {
        recs.risk_mitigation
            .push("Diversify exposure rather than concentrating in this policy".to_string());
        recs.risk_mitigation
            .push("Rebalance the holding portfolio on a regular schedule".to_string());
    }
    if ctx.regulatory.regulatory_risk > 0.7 {
        recs.risk_mitigation
            .push("Verify the issuer's current compliance status".to_string());
    }

    if ctx.liquidity.score < 0.5 {
        recs.short_term
            .push("Low liquidity: plan for a longer holding period".to_string());
    }

    if let Some(real_estate) = ctx.real_estate {
        if real_estate.rental_income_contribution > 0.0 {
            recs.short_term
                .push("Factor the rider's rental cash flow into the offer price".to_string());
        }
        if real_estate.risk_score > 0.6 {
            recs.risk_mitigation
                .push("Monitor property-market volatility behind the linked rider".to_string());
        }
    }

    if ctx.facts.contract_period_years > 10 {
        recs.long_term
            .push("Long-dated contract: monitor market volatility over the holding period".to_string());
    }

    recs
}
