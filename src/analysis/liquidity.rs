//! Secondary-market liquidity analysis

use crate::market::MarketResolution;
use crate::policy::PolicyFacts;

/// Platform fee assumed when scoring fee impact.
const PLATFORM_FEE: f64 = 0.03;

/// Product liquidity scores by category; unknown products score 0.6.
const PRODUCT_LIQUIDITY: [(&str, f64); 5] = [
    ("Investment Linked", 0.9),
    ("Endowment Plan", 0.8),
    ("Whole Life", 0.7),
    ("Term Life", 0.6),
    ("Annuity", 0.5),
];

/// Liquidity analysis outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityAnalysis {
    /// Mean of the four component scores, in [0, 1]
    pub score: f64,

    /// Multiplicative adjustment `clamp(0.8 + score * 0.4, 0.6, 1.2)`
    pub adjustment: f64,

    /// Component scores, for the breakdown
    pub market_liquidity: f64,
    pub trading_volume: f64,
    pub matching_time: f64,
    pub fee_impact: f64,
}

/// Estimated tradability score for a product category.
pub(crate) fn product_liquidity_score(product_type: &str) -> f64 {
    PRODUCT_LIQUIDITY
        .iter()
        .find(|(name, _)| product_type.eq_ignore_ascii_case(name))
        .map(|(_, score)| *score)
        .unwrap_or(0.6)
}

/// Expected matching-time score from the remaining contract horizon:
/// short-dated policies find a counterparty faster.
fn matching_time_score(remaining_years: u32) -> f64 {
    match remaining_years {
        0..=3 => 0.9,
        4..=7 => 0.8,
        8..=10 => 0.7,
        _ => 0.5,
    }
}

/// Combine market liquidity, estimated trading volume, matching time, and
/// fee impact into a liquidity score and adjustment.
pub fn analyze(facts: &PolicyFacts, resolution: &MarketResolution) -> LiquidityAnalysis {
    let market_liquidity = (0.9 - resolution.snapshot().volatility).clamp(0.0, 1.0);
    let trading_volume = product_liquidity_score(&facts.product_type);
    let matching_time = matching_time_score(facts.remaining_years());
    let fee_impact = (1.0 - PLATFORM_FEE * 10.0).clamp(0.0, 1.0);

    let score = (market_liquidity + trading_volume + matching_time + fee_impact) / 4.0;

    LiquidityAnalysis {
        score,
        adjustment: (0.8 + score * 0.4).clamp(0.6, 1.2),
        market_liquidity,
        trading_volume,
        matching_time,
        fee_impact,
    }
}
