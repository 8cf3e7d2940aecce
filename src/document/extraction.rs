//! Document-extracted policy fields
//!
//! Produced by an upstream OCR collaborator and consumed read-only; the
//! engine never touches raw images. A field is "present" when its slot is
//! `Some`, mirroring the extractor's per-field presence flags.

use serde::{Deserialize, Serialize};

/// Fields extracted from a scanned policy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentExtraction {
    /// Policy number as printed on the document
    #[serde(default)]
    pub policy_number: Option<String>,

    /// Name of the insured party
    #[serde(default)]
    pub insured_name: Option<String>,

    /// Policy issue date
    #[serde(default)]
    pub issue_date: Option<String>,

    /// Policy maturity date
    #[serde(default)]
    pub maturity_date: Option<String>,

    /// Premium payment schedule description
    #[serde(default)]
    pub premium_schedule: Option<String>,

    /// Attached riders, comma-separated as extracted
    #[serde(default)]
    pub riders: Option<String>,

    /// Coverage exclusions as extracted
    #[serde(default)]
    pub exclusions: Option<String>,

    /// Currency code as printed on the document
    #[serde(default)]
    pub currency: Option<String>,
}

impl DocumentExtraction {
    /// Required fields for a usable extraction, in reporting order.
    pub const REQUIRED_FIELDS: [&'static str; 4] =
        ["policyNumber", "insuredName", "issueDate", "maturityDate"];

    /// Optional fields counted toward the completeness bonus.
    pub const OPTIONAL_FIELDS: [&'static str; 4] =
        ["premiumSchedule", "riders", "exclusions", "currency"];

    /// Look up a field slot by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "policyNumber" => &self.policy_number,
            "insuredName" => &self.insured_name,
            "issueDate" => &self.issue_date,
            "maturityDate" => &self.maturity_date,
            "premiumSchedule" => &self.premium_schedule,
            "riders" => &self.riders,
            "exclusions" => &self.exclusions,
            "currency" => &self.currency,
            _ => return None,
        };
        slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
