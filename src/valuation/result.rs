//! Valuation result wire types
//!
//! Computed fresh per request and never mutated after construction;
//! persisting the result is a collaborator's responsibility.

use serde::{Deserialize, Serialize};

use crate::analysis::RiskFactors;
use crate::document::DocumentValidation;
use crate::error::DegradedDataWarning;
use crate::valuation::grade::RiskGrade;
use crate::valuation::recommend::Recommendations;

/// Named adjustment contributions behind the final value.
///
/// The four proportional adjustments are the multiplicative factors applied
/// to the baseline; the real-estate and document terms are the additive
/// amounts, in policy currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationBreakdown {
    /// Actuarial baseline value
    pub base_value: f64,

    /// Market condition factor
    pub market_adjustment: f64,

    /// Risk discount factor
    pub risk_adjustment: f64,

    /// Liquidity factor
    pub liquidity_adjustment: f64,

    /// Regulatory factor
    pub regulatory_adjustment: f64,

    /// Additive property-linked rider component
    pub real_estate_adjustment: f64,

    /// Additive document-confidence nudge
    pub document_adjustment: f64,
}

/// Transfer-price recommendation for one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Recommended transfer price, >= 0
    pub final_value: f64,

    /// Discrete risk grade
    pub risk_grade: RiskGrade,

    /// Overall confidence in [0.1, 1.0]
    pub confidence: f64,

    /// Composite risk behind the grade
    pub composite_risk: f64,

    /// Named adjustment contributions
    pub breakdown: ValuationBreakdown,

    /// The five reported risk factor scores
    pub risk_factors: RiskFactors,

    /// Document validation outcome consumed by the pipeline
    pub document: DocumentValidation,

    /// Categorized guidance
    pub recommendations: Recommendations,

    /// Degradations encountered while computing
    pub warnings: Vec<DegradedDataWarning>,
}

impl ValuationResult {
    /// True when every input resolved without fallback.
    pub fn is_fully_grounded(&self) -> bool {
        self.warnings.is_empty()
    }
}
