//! Overall confidence scoring

/// Base confidence before component factors are applied.
const BASE_CONFIDENCE: f64 = 0.8;

/// Lower clamp: confidence is never exactly zero so downstream consumers
/// cannot over-confidently reject a result.
pub const CONFIDENCE_FLOOR: f64 = 0.1;

/// Upper clamp.
pub const CONFIDENCE_CEILING: f64 = 1.0;

/// Inputs to the confidence product, one per pipeline component.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInputs {
    /// Document extraction confidence in [0, 1]
    pub document_confidence: f64,

    /// Market data sub-confidence (0.9 live, 0.6 degraded)
    pub market_sub_confidence: f64,

    /// Composite risk in [0, 1]
    pub composite_risk: f64,

    /// Liquidity score in [0, 1]
    pub liquidity_score: f64,

    /// Regulatory risk in [0, 1]
    pub regulatory_risk: f64,

    /// Real-estate sub-confidence, when that path ran
    pub real_estate_sub_confidence: Option<f64>,
}

/// Multiply the component confidences into one bounded score.
pub fn calculate(inputs: &ConfidenceInputs) -> f64 {
    let mut confidence = BASE_CONFIDENCE
        * inputs.document_confidence
        * inputs.market_sub_confidence
        * (1.0 - inputs.composite_risk * 0.3)
        * inputs.liquidity_score
        * (1.0 - inputs.regulatory_risk * 0.2);

    if let Some(sub) = inputs.real_estate_sub_confidence {
        confidence *= sub;
    }

    confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}
