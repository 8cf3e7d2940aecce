//! Error taxonomy for the valuation pipeline
//!
//! Only `ValuationError::InvalidInput` is fatal and surfaced to the caller.
//! Collaborator failures (`CollaboratorError`) are absorbed locally into a
//! fallback value plus a `DegradedDataWarning` on the result, so the pipeline
//! always terminates with either a complete `ValuationResult` or a single
//! typed rejection naming the offending field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors surfaced to the caller.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Malformed policy facts. The engine refuses to compute rather than
    /// silently sanitizing these.
    #[error("invalid input: {field}: {reason}")]
    InvalidInput {
        /// Name of the offending request field
        field: &'static str,
        reason: String,
    },
}

impl ValuationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValuationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the field that caused the rejection.
    pub fn field(&self) -> &'static str {
        match self {
            ValuationError::InvalidInput { field, .. } => field,
        }
    }
}

/// Failures of injected collaborators (market data, rating lookup).
///
/// Never crosses the engine boundary: every variant is converted into a
/// fallback value and a [`DegradedDataWarning`].
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Call exceeded the configured timeout. Treated identically to
    /// "unavailable" by the engine.
    #[error("collaborator call timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Provider reported a failure or returned unusable data.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Non-fatal degradations recorded on the result.
///
/// Each warning corresponds to a fallback taken somewhere in the pipeline
/// and to a confidence penalty applied downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DegradedDataWarning {
    /// Market fetch failed and no cached snapshot existed; the static
    /// default snapshot was substituted.
    #[serde(rename_all = "camelCase")]
    MarketDataUnavailable { reason: String },

    /// Market fetch failed but a previously cached snapshot for the same
    /// key was served past its time-to-live.
    MarketDataStale,

    /// Company/product pair absent from the rating table; neutral default
    /// scores were substituted.
    #[serde(rename_all = "camelCase")]
    UnknownCompanyRating { company: String },

    /// Required document fields absent from the extraction.
    #[serde(rename_all = "camelCase")]
    DocumentMissing { fields: Vec<String> },

    /// Document fields present but structurally invalid.
    #[serde(rename_all = "camelCase")]
    DocumentInvalid { errors: Vec<String> },
}
