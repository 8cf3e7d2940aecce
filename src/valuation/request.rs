//! Valuation request wire type

use serde::{Deserialize, Serialize};

use crate::analysis::RealEstateFactors;
use crate::document::DocumentExtraction;
use crate::market::MarketSnapshot;
use crate::policy::PolicyFactsInput;

/// One valuation request: required policy facts plus optional document
/// extraction, market override, and property-linked rider facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    /// Raw policy facts (required)
    pub policy: PolicyFactsInput,

    /// Fields extracted from the scanned document, if any
    #[serde(default)]
    pub document: Option<DocumentExtraction>,

    /// Caller-supplied market snapshot; bypasses the provider and cache
    #[serde(default)]
    pub market_override: Option<MarketSnapshot>,

    /// Property-linked rider facts, when the policy declares one
    #[serde(default)]
    pub real_estate: Option<RealEstateFactors>,

    /// Market location hint forwarded to the data provider
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    "Hong Kong".to_string()
}

impl ValuationRequest {
    /// Request carrying only policy facts.
    pub fn from_policy(policy: PolicyFactsInput) -> Self {
        Self {
            policy,
            document: None,
            market_override: None,
            real_estate: None,
            location: default_location(),
        }
    }
}
