//! Quote source trait definition
//!
//! `QuoteSource` is the only contract the monitoring core needs from a
//! venue: fetch the current top of book for a symbol.

use async_trait::async_trait;

use crate::adapters::errors::SourceResult;
use crate::adapters::types::Quote;

/// Common trait for all price sources
///
/// Implementations adapt one venue's API and symbol format. Symbols are
/// passed through verbatim from configuration.
///
/// # Example Implementation
///
/// ```ignore
/// use async_trait::async_trait;
///
/// struct FixedSource(Quote);
///
/// #[async_trait]
/// impl QuoteSource for FixedSource {
///     async fn get_quote(&self, _symbol: &str) -> SourceResult<Quote> {
///         Ok(self.0.clone())
///     }
///     fn venue_name(&self) -> &'static str { "fixed" }
/// }
/// ```
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the current best bid / best ask for `symbol`
    ///
    /// # Returns
    /// * `Ok(Quote)` - Fresh snapshot tagged with this source's identity
    /// * `Err(SourceError)` - Network failure, bad status or malformed payload
    async fn get_quote(&self, symbol: &str) -> SourceResult<Quote>;

    /// Venue identifier (e.g. "binance", "coinbase")
    fn venue_name(&self) -> &'static str;
}
