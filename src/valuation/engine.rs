//! Valuation pipeline orchestration
//!
//! Resolves inputs once (normalize, validate document, fetch market data,
//! look up ratings), fans out to the independent analyzers, then joins for
//! aggregation, confidence, grading, and recommendations. The fan-out is an
//! optimization only: no analyzer observes another's output, so the join is
//! positional and the result deterministic.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};

use crate::analysis::{base_value, liquidity, market, real_estate, regulatory, risk};
use crate::document::{self, DocumentValidation};
use crate::error::{DegradedDataWarning, ValuationError};
use crate::market::{
    CacheLookup, MarketDataCache, MarketDataProvider, MarketKey, MarketResolution, MarketSnapshot,
    StaticMarketProvider,
};
use crate::policy::{self, PolicyFacts};
use crate::rating::{CompanyRatingProvider, RatingEntry, RatingTable, NEUTRAL_COMPANY_STRENGTH};
use crate::valuation::aggregate::{self, Aggregate};
use crate::valuation::confidence::{self, ConfidenceInputs};
use crate::valuation::grade;
use crate::valuation::recommend::{self, RecommendationContext};
use crate::valuation::request::ValuationRequest;
use crate::valuation::result::{ValuationBreakdown, ValuationResult};

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Per-collaborator call timeout
    pub call_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// The valuation engine. Holds injected collaborators and the shared market
/// cache; carries no per-request mutable state.
pub struct ValuationEngine {
    market_provider: Arc<dyn MarketDataProvider>,
    rating_provider: Arc<dyn CompanyRatingProvider>,
    cache: Arc<MarketDataCache>,
    config: EngineConfig,
}

impl ValuationEngine {
    pub fn new(
        market_provider: Arc<dyn MarketDataProvider>,
        rating_provider: Arc<dyn CompanyRatingProvider>,
        cache: Arc<MarketDataCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            market_provider,
            rating_provider,
            cache,
            config,
        }
    }

    /// Engine wired to the static market snapshot and the builtin rating
    /// table; good for demos and deterministic tests.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(StaticMarketProvider::default()),
            Arc::new(RatingTable::builtin()),
            Arc::new(MarketDataCache::new()),
            EngineConfig::default(),
        )
    }

    /// Run the full pipeline for one request.
    ///
    /// All-or-nothing: returns a complete [`ValuationResult`] or a single
    /// [`ValuationError::InvalidInput`]; collaborator failures degrade into
    /// warnings instead of propagating.
    pub fn value_policy(&self, request: &ValuationRequest) -> Result<ValuationResult, ValuationError> {
        let facts = policy::normalize(&request.policy)?;
        debug!(
            "valuing policy: {} / {} ({} yr)",
            facts.company, facts.product_type, facts.contract_period_years
        );

        let document = document::validate(request.document.as_ref());
        let resolution = self.resolve_market(request, &facts)?;
        let rating = self.lookup_rating(&facts);

        let volatility_score = market::analyze(&resolution).volatility_score;
        let company_strength = rating
            .company_strength
            .unwrap_or(NEUTRAL_COMPANY_STRENGTH)
            .clamp(0.0, 1.0);

        // Fork/join over the independent analyses
        let ((base, market_adjustment), (risk, (liquidity, (regulatory, real_estate)))) =
            rayon::join(
                || {
                    rayon::join(
                        || base_value(&facts),
                        || market::analyze(&resolution),
                    )
                },
                || {
                    rayon::join(
                        || risk::assess(&facts, &rating, volatility_score),
                        || {
                            rayon::join(
                                || liquidity::analyze(&facts, &resolution),
                                || {
                                    rayon::join(
                                        || regulatory::analyze(&facts, company_strength),
                                        || request.real_estate.as_ref().map(real_estate::analyze),
                                    )
                                },
                            )
                        },
                    )
                },
            );

        let Aggregate {
            final_value,
            document_adjustment,
            floored,
        } = aggregate::aggregate(
            base,
            market_adjustment.adjustment_factor,
            risk.adjustment,
            liquidity.adjustment,
            regulatory.adjustment,
            real_estate.map(|re| re.adjustment).unwrap_or(0.0),
            &document,
        );
        if floored {
            debug!("final value clipped to the 0.5x baseline floor");
        }

        let confidence = confidence::calculate(&ConfidenceInputs {
            document_confidence: document.confidence,
            market_sub_confidence: market_adjustment.sub_confidence,
            composite_risk: risk.composite,
            liquidity_score: liquidity.score,
            regulatory_risk: regulatory.regulatory_risk,
            real_estate_sub_confidence: real_estate.map(|re| re.sub_confidence),
        });

        let recommendations = recommend::generate(&RecommendationContext {
            facts: &facts,
            document: &document,
            risk: &risk,
            liquidity: &liquidity,
            regulatory: &regulatory,
            real_estate: real_estate.as_ref(),
            market_degraded: resolution.warning().is_some(),
        });

        let warnings = self.collect_warnings(&facts, &document, &resolution, &risk);

        Ok(ValuationResult {
            final_value,
            risk_grade: grade::grade(risk.composite),
            confidence,
            composite_risk: risk.composite,
            breakdown: ValuationBreakdown {
                base_value: base,
                market_adjustment: market_adjustment.adjustment_factor,
                risk_adjustment: risk.adjustment,
                liquidity_adjustment: liquidity.adjustment,
                regulatory_adjustment: regulatory.adjustment,
                real_estate_adjustment: real_estate.map(|re| re.adjustment).unwrap_or(0.0),
                document_adjustment,
            },
            risk_factors: risk.factors,
            document,
            recommendations,
            warnings,
        })
    }

    /// Resolve the market snapshot: caller override, cached/fetched data,
    /// or a tagged degraded fallback. Never fails for provider reasons.
    fn resolve_market(
        &self,
        request: &ValuationRequest,
        facts: &PolicyFacts,
    ) -> Result<MarketResolution, ValuationError> {
        if let Some(snapshot) = request.market_override {
            if !snapshot.is_finite() {
                return Err(ValuationError::invalid(
                    "marketOverride",
                    "snapshot rates must be finite",
                ));
            }
            return Ok(MarketResolution::Live(snapshot));
        }

        let key = MarketKey::new(
            &facts.company,
            &facts.product_type,
            Utc::now().date_naive(),
        );

        let provider = Arc::clone(&self.market_provider);
        let timeout = self.config.call_timeout;
        let (company, product_type, location) = (
            facts.company.clone(),
            facts.product_type.clone(),
            request.location.clone(),
        );

        let lookup = self.cache.get_or_fetch(&key, move || {
            crate::market::call_with_timeout(timeout, move || {
                provider.fetch(&company, &product_type, &location)
            })?
        });

        Ok(match lookup {
            CacheLookup::Fresh(snapshot) | CacheLookup::Fetched(snapshot) => {
                MarketResolution::Live(snapshot)
            }
            CacheLookup::Stale(snapshot) => {
                warn!(
                    "market refresh failed for {}/{}; serving stale snapshot",
                    facts.company, facts.product_type
                );
                MarketResolution::Degraded {
                    snapshot,
                    warning: DegradedDataWarning::MarketDataStale,
                }
            }
            CacheLookup::Unavailable { reason } => {
                warn!(
                    "market data unavailable for {}/{} ({reason}); using static fallback",
                    facts.company, facts.product_type
                );
                MarketResolution::Degraded {
                    snapshot: MarketSnapshot::fallback(),
                    warning: DegradedDataWarning::MarketDataUnavailable { reason },
                }
            }
        })
    }

    /// Rating lookup under the call timeout; a failed call resolves to the
    /// all-unknown entry and is handled like any unknown key downstream.
    fn lookup_rating(&self, facts: &PolicyFacts) -> RatingEntry {
        let provider = Arc::clone(&self.rating_provider);
        let (company, product_type) = (facts.company.clone(), facts.product_type.clone());

        match crate::market::call_with_timeout(self.config.call_timeout, move || {
            provider.lookup(&company, &product_type)
        }) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    "rating lookup failed for {}/{} ({err}); using neutral defaults",
                    facts.company, facts.product_type
                );
                RatingEntry::default()
            }
        }
    }

    /// Warnings in pipeline order: document, market, rating.
    fn collect_warnings(
        &self,
        facts: &PolicyFacts,
        document: &DocumentValidation,
        resolution: &MarketResolution,
        risk: &risk::RiskAssessment,
    ) -> Vec<DegradedDataWarning> {
        let mut warnings = Vec::new();

        if !document.missing_fields.is_empty() {
            warnings.push(DegradedDataWarning::DocumentMissing {
                fields: document.missing_fields.clone(),
            });
        }
        if !document.validation_errors.is_empty() {
            warnings.push(DegradedDataWarning::DocumentInvalid {
                errors: document.validation_errors.clone(),
            });
        }
        if let Some(warning) = resolution.warning() {
            warnings.push(warning.clone());
        }
        if risk.rating_degraded {
            warnings.push(DegradedDataWarning::UnknownCompanyRating {
                company: facts.company.clone(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use crate::policy::PolicyFactsInput;

    /// Provider that always fails, standing in for a dead market feed.
    struct FailingMarketProvider;

    impl MarketDataProvider for FailingMarketProvider {
        fn fetch(
            &self,
            _company: &str,
            _product_type: &str,
            _location: &str,
        ) -> Result<MarketSnapshot, CollaboratorError> {
            Err(CollaboratorError::Unavailable("feed down".to_string()))
        }
    }

    fn aia_policy() -> PolicyFactsInput {
        PolicyFactsInput {
            company: "AIA".to_string(),
            product_type: "Savings Plan".to_string(),
            contract_period_years: 10,
            paid_years: 5,
            annual_premium: 3000.0,
            total_premium: Some(15000.0),
            surrender_value: 12000.0,
            currency: Some("USD".to_string()),
        }
    }

    fn complete_document() -> crate::document::DocumentExtraction {
        crate::document::DocumentExtraction {
            policy_number: Some("HK12345678".to_string()),
            insured_name: Some("Chan Tai Man".to_string()),
            issue_date: Some("2015-06-01".to_string()),
            maturity_date: Some("2035-06-01".to_string()),
            premium_schedule: Some("annual".to_string()),
            riders: Some("CI".to_string()),
            exclusions: Some("none".to_string()),
            currency: Some("USD".to_string()),
        }
    }

    #[test]
    fn test_worked_example_respects_floor_and_confidence_ordering() {
        let engine = ValuationEngine::with_defaults();

        let bare = ValuationRequest::from_policy(aia_policy());
        let result = engine.value_policy(&bare).unwrap();

        // baseValue >= 0.8 * 12000 = 9600, so the floor puts the final at
        // 6000 or more
        assert!(result.final_value >= 6000.0);
        assert!(result.breakdown.base_value >= 9600.0);
        assert!(result.confidence >= 0.1 && result.confidence <= 1.0);

        let mut documented = ValuationRequest::from_policy(aia_policy());
        documented.document = Some(complete_document());
        let documented_result = engine.value_policy(&documented).unwrap();

        assert!(result.confidence <= documented_result.confidence);
    }

    #[test]
    fn test_negative_contract_period_raises_invalid_input() {
        let engine = ValuationEngine::with_defaults();
        let mut request = ValuationRequest::from_policy(aia_policy());
        request.policy.contract_period_years = -1;

        let err = engine.value_policy(&request).unwrap_err();
        assert_eq!(err.field(), "contractPeriodYears");
    }

    #[test]
    fn test_failed_market_feed_still_yields_a_result() {
        let degraded_engine = ValuationEngine::new(
            Arc::new(FailingMarketProvider),
            Arc::new(RatingTable::builtin()),
            Arc::new(MarketDataCache::new()),
            EngineConfig::default(),
        );
        let live_engine = ValuationEngine::with_defaults();

        // Include a document so confidence sits above the 0.1 floor and the
        // market penalty is observable
        let mut request = ValuationRequest::from_policy(aia_policy());
        request.document = Some(complete_document());

        let degraded = degraded_engine.value_policy(&request).unwrap();
        let live = live_engine.value_policy(&request).unwrap();

        assert!(degraded
            .warnings
            .iter()
            .any(|w| matches!(w, DegradedDataWarning::MarketDataUnavailable { .. })));
        assert!(degraded.confidence < live.confidence);
        assert!(degraded.final_value >= 0.5 * degraded.breakdown.base_value);
    }

    #[test]
    fn test_identical_requests_are_bit_identical() {
        let engine = ValuationEngine::with_defaults();
        let mut request = ValuationRequest::from_policy(aia_policy());
        request.document = Some(complete_document());
        request.market_override = Some(MarketSnapshot::fallback());

        let first = engine.value_policy(&request).unwrap();
        let second = engine.value_policy(&request).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_missing_required_field_strictly_lowers_confidence() {
        let engine = ValuationEngine::with_defaults();

        let mut complete = ValuationRequest::from_policy(aia_policy());
        complete.document = Some(complete_document());

        let mut partial = complete.clone();
        partial.document.as_mut().unwrap().insured_name = None;

        let complete_result = engine.value_policy(&complete).unwrap();
        let partial_result = engine.value_policy(&partial).unwrap();

        assert!(partial_result.confidence < complete_result.confidence);
        assert!(partial_result
            .warnings
            .iter()
            .any(|w| matches!(w, DegradedDataWarning::DocumentMissing { .. })));
    }

    #[test]
    fn test_unknown_company_degrades_with_neutral_rating() {
        let engine = ValuationEngine::with_defaults();
        let mut request = ValuationRequest::from_policy(aia_policy());
        request.policy.company = "Acme Mutual".to_string();

        let result = engine.value_policy(&request).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, DegradedDataWarning::UnknownCompanyRating { .. })));
        assert_eq!(result.risk_factors.company_strength, 0.70);
    }

    #[test]
    fn test_non_finite_market_override_is_rejected() {
        let engine = ValuationEngine::with_defaults();
        let mut request = ValuationRequest::from_policy(aia_policy());
        request.market_override = Some(MarketSnapshot {
            interest_rate: f64::NAN,
            ..MarketSnapshot::fallback()
        });

        let err = engine.value_policy(&request).unwrap_err();
        assert_eq!(err.field(), "marketOverride");
    }

    #[test]
    fn test_real_estate_rider_adds_value_additively() {
        let engine = ValuationEngine::with_defaults();

        let plain = ValuationRequest::from_policy(aia_policy());
        let mut with_rider = ValuationRequest::from_policy(aia_policy());
        with_rider.real_estate = Some(crate::analysis::RealEstateFactors {
            property_type: crate::analysis::PropertyType::Residential,
            location: "Hong Kong".to_string(),
            market_value: 500_000.0,
            rental_yield: 0.03,
            property_age_years: 10.0,
            maintenance_cost: 2_000.0,
            occupancy_rate: 0.95,
        });

        let base = engine.value_policy(&plain).unwrap();
        let linked = engine.value_policy(&with_rider).unwrap();

        assert!(linked.breakdown.real_estate_adjustment > 0.0);
        assert!(linked.final_value > base.final_value);
        // The rider also tempers confidence through its sub-confidence
        assert!(linked.confidence <= base.confidence);
    }

    #[test]
    fn test_floor_property_over_adversarial_inputs() {
        let engine = ValuationEngine::with_defaults();

        for (period, paid, premium, surrender) in [
            (1, 0, 0.0, 1.0),
            (50, 50, 100.0, 1_000_000.0),
            (30, 0, 100_000.0, 10.0),
            (10, 5, 3_000.0, 0.0),
        ] {
            let request = ValuationRequest::from_policy(PolicyFactsInput {
                company: "Nobody".to_string(),
                product_type: "Mystery".to_string(),
                contract_period_years: period,
                paid_years: paid,
                annual_premium: premium,
                total_premium: None,
                surrender_value: surrender,
                currency: None,
            });
            let result = engine.value_policy(&request).unwrap();
            assert!(
                result.final_value >= 0.5 * result.breakdown.base_value,
                "floor violated for period={period}"
            );
            assert!(result.confidence >= 0.1 && result.confidence <= 1.0);
        }
    }
}
