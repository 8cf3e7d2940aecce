//! Regulatory environment analysis

use crate::policy::PolicyFacts;

/// Regulatory risk by product category; unknown products carry 0.3.
const PRODUCT_REGULATORY_RISK: [(&str, f64); 5] = [
    ("Annuity", 0.5),
    ("Whole Life", 0.4),
    ("Investment Linked", 0.3),
    ("Endowment Plan", 0.2),
    ("Term Life", 0.1),
];

/// Regulatory analysis outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegulatoryAnalysis {
    /// Issuer compliance score in [0, 1]
    pub compliance_score: f64,

    /// Product regulatory risk in [0, 1]
    pub regulatory_risk: f64,

    /// Multiplicative adjustment `max(0.9, 1 - regulatory_risk * 0.1)`
    pub adjustment: f64,
}

/// Regulatory risk attributed to a product category.
pub(crate) fn product_regulatory_risk(product_type: &str) -> f64 {
    PRODUCT_REGULATORY_RISK
        .iter()
        .find(|(name, _)| product_type.eq_ignore_ascii_case(name))
        .map(|(_, risk)| *risk)
        .unwrap_or(0.3)
}

/// Analyze the regulatory environment for a policy. Compliance tracks the
/// issuer's strength score so it responds to the rating table.
pub fn analyze(facts: &PolicyFacts, company_strength: f64) -> RegulatoryAnalysis {
    let compliance_score = (0.6 + company_strength * 0.3).clamp(0.0, 1.0);
    let regulatory_risk = product_regulatory_risk(&facts.product_type);

    RegulatoryAnalysis {
        compliance_score,
        regulatory_risk,
        adjustment: (1.0 - regulatory_risk * 0.1).max(0.9),
    }
}
