//! Source factory
//!
//! `AnySource` is an enum over the concrete REST sources so configuration can
//! pick a venue at runtime without the caller knowing the concrete type.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::binance::BinanceSource;
use crate::adapters::coinbase::CoinbaseSource;
use crate::adapters::errors::SourceResult;
use crate::adapters::traits::QuoteSource;
use crate::adapters::types::Quote;
use crate::config::{constants, AppConfig, SourceConfig, Venue};
use crate::core::fetcher::SourceBinding;

// =============================================================================
// AnySource: enum-based dispatch
// =============================================================================

pub enum AnySource {
    Binance(BinanceSource),
    Coinbase(CoinbaseSource),
}

#[async_trait]
impl QuoteSource for AnySource {
    async fn get_quote(&self, symbol: &str) -> SourceResult<Quote> {
        match self {
            AnySource::Binance(s) => s.get_quote(symbol).await,
            AnySource::Coinbase(s) => s.get_quote(symbol).await,
        }
    }

    fn venue_name(&self) -> &'static str {
        match self {
            AnySource::Binance(s) => s.venue_name(),
            AnySource::Coinbase(s) => s.venue_name(),
        }
    }
}

// =============================================================================
// Factory Functions
// =============================================================================

/// Build the source for one configuration entry
///
/// `base_url` from the entry wins over the venue's env/default endpoint.
pub fn create_source(config: &SourceConfig, request_timeout: Duration) -> AnySource {
    match config.venue {
        Venue::Binance => {
            let base_url = config.base_url.clone().unwrap_or_else(constants::binance_rest_url);
            AnySource::Binance(BinanceSource::new(base_url, request_timeout))
        }
        Venue::Coinbase => {
            let base_url = config.base_url.clone().unwrap_or_else(constants::coinbase_rest_url);
            AnySource::Coinbase(CoinbaseSource::new(base_url, request_timeout))
        }
    }
}

/// Build the ordered bindings for every configured source
pub fn create_bindings(config: &AppConfig) -> Vec<SourceBinding> {
    let timeout = config.monitor.source_timeout();
    config
        .sources
        .iter()
        .map(|source| {
            let adapter: Arc<dyn QuoteSource> = Arc::new(create_source(source, timeout));
            SourceBinding::new(adapter, source.symbol.clone())
        })
        .collect()
}
