//! Market data provider interface and call-timeout plumbing

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::CollaboratorError;
use crate::market::snapshot::MarketSnapshot;

/// External market data source.
///
/// Implementations own their transport (HTTP, file, fixture); the engine
/// only sees a fetch that either yields a finite snapshot or fails.
pub trait MarketDataProvider: Send + Sync {
    /// Fetch current market conditions for a company/product/location.
    fn fetch(
        &self,
        company: &str,
        product_type: &str,
        location: &str,
    ) -> Result<MarketSnapshot, CollaboratorError>;
}

/// Provider returning one fixed snapshot. Used by the demo binaries and as
/// a deterministic stand-in wherever no live feed is wired up.
#[derive(Debug, Clone)]
pub struct StaticMarketProvider {
    snapshot: MarketSnapshot,
}

impl StaticMarketProvider {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self { snapshot }
    }
}

impl Default for StaticMarketProvider {
    fn default() -> Self {
        Self::new(MarketSnapshot::fallback())
    }
}

impl MarketDataProvider for StaticMarketProvider {
    fn fetch(
        &self,
        _company: &str,
        _product_type: &str,
        _location: &str,
    ) -> Result<MarketSnapshot, CollaboratorError> {
        Ok(self.snapshot)
    }
}

/// Run a collaborator call on a worker thread, bounded by `timeout`.
///
/// On timeout the worker is abandoned (it may still complete, but its result
/// is discarded) and the caller proceeds with fallback handling. The closure
/// must therefore not hold locks the caller needs.
pub fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, CollaboratorError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // Receiver may be gone after a timeout; nothing to do about it.
        let _ = tx.send(call());
    });

    rx.recv_timeout(timeout)
        .map_err(|_| CollaboratorError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        })
}
