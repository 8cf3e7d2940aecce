//! Market snapshot and the tagged live/degraded resolution

use serde::{Deserialize, Serialize};

use crate::error::DegradedDataWarning;

/// External market conditions at valuation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Prevailing market interest rate (annual, decimal)
    pub interest_rate: f64,

    /// Expected inflation rate (annual, decimal)
    pub inflation_rate: f64,

    /// Policy-currency exchange rate relative to the valuation currency
    pub currency_rate: f64,

    /// Annualized market volatility (decimal)
    pub volatility: f64,
}

impl MarketSnapshot {
    /// Documented static fallback used when no provider data is available.
    pub fn fallback() -> Self {
        Self {
            interest_rate: 0.05,
            inflation_rate: 0.02,
            currency_rate: 1.0,
            volatility: 0.15,
        }
    }

    /// All rates must be finite for the snapshot to be usable.
    pub fn is_finite(&self) -> bool {
        self.interest_rate.is_finite()
            && self.inflation_rate.is_finite()
            && self.currency_rate.is_finite()
            && self.volatility.is_finite()
    }
}

/// How the snapshot used for a valuation was obtained.
///
/// A degraded resolution carries the substituted snapshot and the warning
/// explaining why, so downstream confidence math can tell real data from
/// fallbacks instead of receiving an indistinguishable hard-coded object.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketResolution {
    /// Fresh data from the provider (or a caller-supplied override)
    Live(MarketSnapshot),

    /// Fallback data: a stale cache entry or the static default
    Degraded {
        snapshot: MarketSnapshot,
        warning: DegradedDataWarning,
    },
}

impl MarketResolution {
    /// The snapshot to compute with, regardless of provenance.
    pub fn snapshot(&self) -> &MarketSnapshot {
        match self {
            MarketResolution::Live(snapshot) => snapshot,
            MarketResolution::Degraded { snapshot, .. } => snapshot,
        }
    }

    /// Sub-confidence contributed by market data: 0.9 live, 0.6 degraded.
    pub fn sub_confidence(&self) -> f64 {
        match self {
            MarketResolution::Live(_) => 0.9,
            MarketResolution::Degraded { .. } => 0.6,
        }
    }

    /// Warning to record on the result, if any.
    pub fn warning(&self) -> Option<&DegradedDataWarning> {
        match self {
            MarketResolution::Live(_) => None,
            MarketResolution::Degraded { warning, .. } => Some(warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_finite() {
        assert!(MarketSnapshot::fallback().is_finite());
    }

    #[test]
    fn test_resolution_sub_confidence() {
        let live = MarketResolution::Live(MarketSnapshot::fallback());
        assert_eq!(live.sub_confidence(), 0.9);

        let degraded = MarketResolution::Degraded {
            snapshot: MarketSnapshot::fallback(),
            warning: DegradedDataWarning::MarketDataStale,
        };
        assert_eq!(degraded.sub_confidence(), 0.6);
        assert!(degraded.warning().is_some());
    }
}
