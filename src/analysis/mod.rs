//! Independent adjustment analyses
//!
//! Each analyzer is a pure function of the normalized facts plus an external
//! snapshot, producing a bounded adjustment and its own sub-confidence. None
//! depends on another's output, so the engine runs them fork/join.

pub mod base_value;
pub mod liquidity;
pub mod market;
pub mod real_estate;
pub mod regulatory;
pub mod risk;

pub use base_value::base_value;
pub use liquidity::LiquidityAnalysis;
pub use market::MarketAdjustment;
pub use real_estate::{PropertyType, RealEstateAnalysis, RealEstateFactors};
pub use regulatory::RegulatoryAnalysis;
pub use risk::{RiskAssessment, RiskFactors};
