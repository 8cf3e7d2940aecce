//! Valuation pipeline: aggregation, scoring, grading, and orchestration
//!
//! # Example
//!
//! ```rust,ignore
//! use valuation_system::{ValuationEngine, ValuationRequest};
//!
//! let engine = ValuationEngine::with_defaults();
//! let result = engine.value_policy(&request)?;
//! println!("{} ({})", result.final_value, result.risk_grade);
//! ```

mod aggregate;
mod confidence;
mod engine;
mod grade;
mod recommend;
mod request;
mod result;

pub use aggregate::{Aggregate, VALUE_FLOOR};
pub use confidence::{ConfidenceInputs, CONFIDENCE_CEILING, CONFIDENCE_FLOOR};
pub use engine::{EngineConfig, ValuationEngine};
pub use grade::{grade, RiskGrade};
pub use recommend::Recommendations;
pub use request::ValuationRequest;
pub use result::{ValuationBreakdown, ValuationResult};
