//! Coinbase Exchange quote source
//!
//! Reads `GET /products/{product_id}/ticker`. The ticker carries its own
//! trade time, which is used as the quote timestamp when present.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::errors::{SourceError, SourceResult};
use crate::adapters::traits::QuoteSource;
use crate::adapters::types::{create_http_client, Quote, SourceId};

pub const VENUE: &str = "coinbase";

#[derive(Debug, Deserialize)]
struct ProductTicker {
    bid: Decimal,
    ask: Decimal,
    #[serde(default)]
    time: Option<DateTime<Utc>>,
}

/// Coinbase Exchange REST quote source
pub struct CoinbaseSource {
    client: reqwest::Client,
    base_url: String,
}

impl CoinbaseSource {
    /// Create a source against `base_url` (e.g. `https://api.exchange.coinbase.com`)
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            client: create_http_client(VENUE, request_timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Coinbase product ids look like `BTC-USD`
    pub fn normalize_symbol(symbol: &str) -> String {
        symbol.replace('/', "-").to_uppercase()
    }
}

#[async_trait]
impl QuoteSource for CoinbaseSource {
    async fn get_quote(&self, symbol: &str) -> SourceResult<Quote> {
        let product_id = Self::normalize_symbol(symbol);
        let url = format!("{}/products/{}/ticker", self.base_url, product_id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ticker: ProductTicker = serde_json::from_str(&body)
            .map_err(|e| SourceError::InvalidResponse(format!("ticker: {}", e)))?;

        debug!(
            venue = VENUE,
            symbol = %product_id,
            bid = %ticker.bid,
            ask = %ticker.ask,
            "Quote received"
        );

        Ok(Quote::new(
            SourceId::for_venue(VENUE, symbol),
            ticker.bid,
            ticker.ask,
            ticker.time.unwrap_or_else(Utc::now),
        ))
    }

    fn venue_name(&self) -> &'static str {
        VENUE
    }
}
