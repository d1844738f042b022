//! Core data types shared by all quote sources
//!
//! A `Quote` is the top-of-book snapshot one venue returns for one symbol.
//! Quotes are plain values: every polling round produces fresh ones.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// SourceId
// =============================================================================

/// Stable label for one configured source, e.g. `binance:BTCUSDT`
///
/// Used as the key of `Observation::quotes` and as the buy/sell side
/// names in `ArbitrageResult`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the canonical `venue:symbol` identity
    pub fn for_venue(venue: &str, symbol: &str) -> Self {
        Self(format!("{}:{}", venue, symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// Quote
// =============================================================================

/// Best bid / best ask snapshot from one source
///
/// `best_bid <= best_ask` is expected but not enforced; a crossed quote
/// only yields an odd evaluation, never a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub source_id: SourceId,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        source_id: SourceId,
        best_bid: Decimal,
        best_ask: Decimal,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_id,
            best_bid,
            best_ask,
            observed_at,
        }
    }

    /// Bid/ask spread in quote currency (ask - bid), saturating at the
    /// `Decimal` bounds
    #[inline]
    pub fn spread(&self) -> Decimal {
        self.best_ask.saturating_sub(self.best_bid)
    }
}

// =============================================================================
// Shared HTTP client
// =============================================================================

/// Connection timeout for REST sources (milliseconds)
const HTTP_CONNECT_TIMEOUT_MS: u64 = 3000;
/// Max idle connections per host in connection pool
const HTTP_POOL_MAX_IDLE: usize = 2;
/// How long idle connections stay in the pool (seconds)
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Create the HTTP client used by a REST quote source
///
/// The request timeout is set per source; the fetcher applies its own
/// round timeout on top of it.
pub fn create_http_client(venue: &str, request_timeout: Duration) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .user_agent(concat!("spot-arb-monitor/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::debug!(
        phase = "init",
        venue = %venue,
        timeout_ms = request_timeout.as_millis() as u64,
        "HTTP client created"
    );
    client
}
