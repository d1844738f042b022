//! Binance spot quote source
//!
//! Reads the REST book ticker (`GET /api/v3/ticker/bookTicker`), which
//! carries the best bid and best ask but no timestamp, so quotes are
//! stamped on receipt.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::errors::{SourceError, SourceResult};
use crate::adapters::traits::QuoteSource;
use crate::adapters::types::{create_http_client, Quote, SourceId};

pub const VENUE: &str = "binance";

/// Book ticker payload (only the fields we use)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    symbol: String,
    bid_price: Decimal,
    ask_price: Decimal,
}

/// Binance REST quote source
pub struct BinanceSource {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceSource {
    /// Create a source against `base_url` (e.g. `https://api.binance.com`)
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            client: create_http_client(VENUE, request_timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Binance wants `BTCUSDT`; accept `BTC/USDT` and `btc-usdt` too
    pub fn normalize_symbol(symbol: &str) -> String {
        symbol
            .chars()
            .filter(|c| *c != '/' && *c != '-')
            .collect::<String>()
            .to_uppercase()
    }
}

#[async_trait]
impl QuoteSource for BinanceSource {
    async fn get_quote(&self, symbol: &str) -> SourceResult<Quote> {
        let venue_symbol = Self::normalize_symbol(symbol);
        let url = format!("{}/api/v3/ticker/bookTicker", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", venue_symbol.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ticker: BookTicker = serde_json::from_str(&body)
            .map_err(|e| SourceError::InvalidResponse(format!("bookTicker: {}", e)))?;

        if ticker.symbol != venue_symbol {
            return Err(SourceError::InvalidResponse(format!(
                "requested {} but got {}",
                venue_symbol, ticker.symbol
            )));
        }

        debug!(
            venue = VENUE,
            symbol = %venue_symbol,
            bid = %ticker.bid_price,
            ask = %ticker.ask_price,
            "Quote received"
        );

        Ok(Quote::new(
            SourceId::for_venue(VENUE, symbol),
            ticker.bid_price,
            ticker.ask_price,
            Utc::now(),
        ))
    }

    fn venue_name(&self) -> &'static str {
        VENUE
    }
}
