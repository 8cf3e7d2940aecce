//! Market condition adjustment
//!
//! Four independent partials (interest rate, inflation, currency, volatility)
//! measured as deviations from the baseline snapshot, each bounded to +/-5%,
//! summed into one multiplicative adjustment factor.

use crate::market::{MarketResolution, MarketSnapshot};

/// Bound on each partial adjustment.
const PARTIAL_BOUND: f64 = 0.05;

/// Volatility level that maps to a volatility score of 1.0.
const VOLATILITY_SCALE: f64 = 0.30;

/// Market adjustment outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketAdjustment {
    /// Multiplicative factor applied to the baseline, in [0.8, 1.2]
    pub adjustment_factor: f64,

    /// Market volatility mapped to [0, 1]
    pub volatility_score: f64,

    /// 0.9 for a live snapshot, 0.6 for a degraded one
    pub sub_confidence: f64,

    /// Individual bounded partials, for the breakdown
    pub interest_partial: f64,
    pub inflation_partial: f64,
    pub currency_partial: f64,
    pub volatility_partial: f64,
}

/// Analyze market conditions against the baseline snapshot.
pub fn analyze(resolution: &MarketResolution) -> MarketAdjustment {
    let snapshot = resolution.snapshot();
    let baseline = MarketSnapshot::fallback();

    // Rates above baseline pull value down (better alternatives elsewhere);
    // a stronger policy currency pushes it up.
    let interest_partial = bounded((baseline.interest_rate - snapshot.interest_rate) * 0.8);
    let inflation_partial = bounded(baseline.inflation_rate - snapshot.inflation_rate);
    let currency_partial = bounded((snapshot.currency_rate - 1.0) * 0.02);
    let volatility_partial = bounded((baseline.volatility - snapshot.volatility) * 0.25);

    let adjustment_factor =
        1.0 + interest_partial + inflation_partial + currency_partial + volatility_partial;

    MarketAdjustment {
        adjustment_factor,
        volatility_score: (snapshot.volatility / VOLATILITY_SCALE).clamp(0.0, 1.0),
        sub_confidence: resolution.sub_confidence(),
        interest_partial,
        inflation_partial,
        currency_partial,
        volatility_partial,
    }
}

fn bounded(partial: f64) -> f64 {
    partial.clamp(-PARTIAL_BOUND, PARTIAL_BOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DegradedDataWarning;
    use approx::assert_relative_eq;

    #[test]
    fn test_baseline_snapshot_is_neutral() {
        let resolution = MarketResolution::Live(MarketSnapshot::fallback());
        let adjustment = analyze(&resolution);
        assert_relative_eq!(adjustment.adjustment_factor, 1.0);
        assert_relative_eq!(adjustment.volatility_score, 0.5);
        assert_eq!(adjustment.sub_confidence, 0.9);
    }

    #[test]
    fn test_partials_are_bounded() {
        let extreme = MarketSnapshot {
            interest_rate: 0.50,
            inflation_rate: 0.40,
            currency_rate: 100.0,
            volatility: 2.0,
        };
        let adjustment = analyze(&MarketResolution::Live(extreme));

        assert_eq!(adjustment.interest_partial, -0.05);
        assert_eq!(adjustment.inflation_partial, -0.05);
        assert_eq!(adjustment.currency_partial, 0.05);
        assert_eq!(adjustment.volatility_partial, -0.05);
        assert!(adjustment.adjustment_factor >= 0.8 && adjustment.adjustment_factor <= 1.2);
    }

    #[test]
    fn test_degraded_resolution_lowers_sub_confidence() {
        let degraded = MarketResolution::Degraded {
            snapshot: MarketSnapshot::fallback(),
            warning: DegradedDataWarning::MarketDataStale,
        };
        assert_eq!(analyze(&degraded).sub_confidence, 0.6);
    }

    #[test]
    fn test_low_rates_raise_value() {
        let easy_money = MarketSnapshot {
            interest_rate: 0.01,
            inflation_rate: 0.0,
            currency_rate: 1.0,
            volatility: 0.05,
        };
        let adjustment = analyze(&MarketResolution::Live(easy_money));
        assert!(adjustment.adjustment_factor > 1.0);
    }
}
