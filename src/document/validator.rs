//! Confidence scoring and structural validation of document extractions
//!
//! Scores a [`DocumentExtraction`] independently of the rest of the pipeline.
//! An absent or unusable extraction is never an error here, only a
//! low-confidence signal consumed downstream.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::extraction::DocumentExtraction;

/// Penalty per missing required field.
const MISSING_FIELD_PENALTY: f64 = 0.1;

/// Penalty per structural validation error.
const VALIDATION_ERROR_PENALTY: f64 = 0.15;

/// Weight of the field-completeness bonus.
const COMPLETENESS_BONUS: f64 = 0.1;

/// Date formats accepted from extractors.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Currency codes recognized on policy documents.
const KNOWN_CURRENCIES: [&str; 12] = [
    "USD", "HKD", "EUR", "GBP", "SGD", "CNY", "JPY", "KRW", "AUD", "CAD", "CHF", "TWD",
];

/// Outcome of validating one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValidation {
    /// Overall extraction confidence in [0, 1]
    pub confidence: f64,

    /// Required fields absent from the extraction
    pub missing_fields: Vec<String>,

    /// Structural failures of fields that were present
    pub validation_errors: Vec<String>,

    /// Best-effort corrections for fields that failed validation,
    /// keyed by wire field name
    pub suggested_corrections: BTreeMap<String, String>,
}

impl DocumentValidation {
    /// True when every required field is present and structurally valid.
    pub fn is_valid(&self) -> bool {
        self.missing_fields.is_empty() && self.validation_errors.is_empty()
    }

    /// Validation of an absent extraction: zero confidence, everything
    /// required reported missing.
    pub fn absent() -> Self {
        Self {
            confidence: 0.0,
            missing_fields: DocumentExtraction::REQUIRED_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            validation_errors: vec!["no document extraction provided".to_string()],
            suggested_corrections: BTreeMap::new(),
        }
    }
}

/// Score and validate an extraction.
///
/// Starts from 1.0 confidence, subtracts [`MISSING_FIELD_PENALTY`] per absent
/// required field and [`VALIDATION_ERROR_PENALTY`] per structural error, adds
/// [`COMPLETENESS_BONUS`] scaled by field completeness (required fields
/// weighted 0.8, optional 0.2 -- a bonus on optional fields alone would let a
/// one-field-short extraction clamp to the same score as a complete one),
/// then clamps to [0, 1].
pub fn validate(extraction: Option<&DocumentExtraction>) -> DocumentValidation {
    let Some(extraction) = extraction else {
        return DocumentValidation::absent();
    };

    let mut missing_fields = Vec::new();
    let mut validation_errors = Vec::new();
    let mut suggested_corrections = BTreeMap::new();

    for field in DocumentExtraction::REQUIRED_FIELDS {
        if extraction.field(field).is_none() {
            missing_fields.push(field.to_string());
        }
    }

    for field in ["issueDate", "maturityDate"] {
        if let Some(raw) = extraction.field(field) {
            if parse_document_date(raw).is_none() {
                validation_errors.push(format!("{field}: unrecognized date \"{raw}\""));
                if let Some(corrected) = suggest_date_correction(raw) {
                    suggested_corrections.insert(field.to_string(), corrected);
                }
            }
        }
    }

    if let Some(number) = extraction.field("policyNumber") {
        if !is_valid_policy_number(number) {
            validation_errors.push(format!("policyNumber: malformed \"{number}\""));
            let corrected = suggest_policy_number_correction(number);
            if is_valid_policy_number(&corrected) {
                suggested_corrections.insert("policyNumber".to_string(), corrected);
            }
        }
    }

    if let Some(code) = extraction.field("currency") {
        let upper = code.to_ascii_uppercase();
        if !KNOWN_CURRENCIES.contains(&upper.as_str()) {
            validation_errors.push(format!("currency: unrecognized code \"{code}\""));
        }
    }

    let required_present =
        DocumentExtraction::REQUIRED_FIELDS.len() - missing_fields.len();
    let optional_present = DocumentExtraction::OPTIONAL_FIELDS
        .iter()
        .filter(|f| extraction.field(f).is_some())
        .count();
    let completeness = required_present as f64 / DocumentExtraction::REQUIRED_FIELDS.len() as f64
        * 0.8
        + optional_present as f64 / DocumentExtraction::OPTIONAL_FIELDS.len() as f64 * 0.2;

    let confidence = (1.0 - missing_fields.len() as f64 * MISSING_FIELD_PENALTY
        - validation_errors.len() as f64 * VALIDATION_ERROR_PENALTY
        + completeness * COMPLETENESS_BONUS)
        .clamp(0.0, 1.0);

    DocumentValidation {
        confidence,
        missing_fields,
        validation_errors,
        suggested_corrections,
    }
}

/// Parse an extracted date string against the accepted formats.
pub fn parse_document_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Policy numbers are 8-20 uppercase alphanumeric characters.
fn is_valid_policy_number(number: &str) -> bool {
    (8..=20).contains(&number.len())
        && number
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Reassemble a malformed date from its numeric groups, year-first.
fn suggest_date_correction(raw: &str) -> Option<String> {
    let groups: Vec<String> = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();
    if groups.len() != 3 {
        return None;
    }

    // Year is whichever group has four digits; day/month keep their order.
    let (year, month, day) = if groups[0].len() == 4 {
        (&groups[0], &groups[1], &groups[2])
    } else if groups[2].len() == 4 {
        (&groups[2], &groups[1], &groups[0])
    } else {
        return None;
    };

    let candidate = format!("{year}-{:0>2}-{:0>2}", month, day);
    parse_document_date(&candidate).map(|_| candidate)
}

/// Strip separators and lowercase noise from a policy number.
fn suggest_policy_number_correction(number: &str) -> String {
    number
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
