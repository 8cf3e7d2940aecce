//! Discrete risk grading
//!
//! Maps composite risk onto ten ordered letter grades through a fixed ladder
//! of `(upper bound exclusive, grade)` pairs. The mapping is total over
//! [0, 1] (and saturates at D beyond it), with no gaps between bins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade from best (lowest risk) to worst.
///
/// Variant order matters: derived `Ord` makes "worse" compare greater, which
/// the monotonicity tests rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    D,
}

/// Grade ladder: first bin whose upper bound exceeds the composite wins.
const GRADE_LADDER: [(f64, RiskGrade); 9] = [
    (0.20, RiskGrade::APlus),
    (0.30, RiskGrade::A),
    (0.40, RiskGrade::AMinus),
    (0.50, RiskGrade::BPlus),
    (0.60, RiskGrade::B),
    (0.70, RiskGrade::BMinus),
    (0.80, RiskGrade::CPlus),
    (0.90, RiskGrade::C),
    (0.95, RiskGrade::CMinus),
];

/// Grade a composite risk score.
pub fn grade(composite_risk: f64) -> RiskGrade {
    for (upper_bound, grade) in GRADE_LADDER {
        if composite_risk < upper_bound {
            return grade;
        }
    }
    RiskGrade::D
}

impl RiskGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskGrade::APlus => "A+",
            RiskGrade::A => "A",
            RiskGrade::AMinus => "A-",
            RiskGrade::BPlus => "B+",
            RiskGrade::B => "B",
            RiskGrade::BMinus => "B-",
            RiskGrade::CPlus => "C+",
            RiskGrade::C => "C",
            RiskGrade::CMinus => "C-",
            RiskGrade::D => "D",
        }
    }
}

impl fmt::Display for RiskGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
