//! Market data: snapshots, provider interface, and the shared cache

mod cache;
mod provider;
mod snapshot;

pub use cache::{CacheLookup, MarketDataCache, MarketKey, DEFAULT_TTL};
pub use provider::{call_with_timeout, MarketDataProvider, StaticMarketProvider};
pub use snapshot::{MarketResolution, MarketSnapshot};
