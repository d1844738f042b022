//! One concurrent polling round over all configured sources
//!
//! Every source is fetched in its own spawned task, bounded by the per-source
//! timeout, and the round joins all of them before returning. A failure of one
//! source (error, timeout, panic) is recorded and never aborts the others.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::adapters::errors::SourceError;
use crate::adapters::traits::QuoteSource;
use crate::adapters::types::{Quote, SourceId};

/// A configured source together with the symbol it is polled for
#[derive(Clone)]
pub struct SourceBinding {
    pub id: SourceId,
    pub source: Arc<dyn QuoteSource>,
    pub symbol: String,
}

impl SourceBinding {
    pub fn new(source: Arc<dyn QuoteSource>, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            id: SourceId::for_venue(source.venue_name(), &symbol),
            source,
            symbol,
        }
    }
}

impl std::fmt::Debug for SourceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceBinding")
            .field("id", &self.id)
            .field("symbol", &self.symbol)
            .finish()
    }
}

/// Outcome of one round: each binding lands in exactly one of the two maps
#[derive(Debug, Default)]
pub struct FetchRound {
    pub successes: BTreeMap<SourceId, Quote>,
    pub failures: BTreeMap<SourceId, SourceError>,
}

impl FetchRound {
    pub fn quote(&self, id: &SourceId) -> Option<&Quote> {
        self.successes.get(id)
    }
}

/// Aborts still-running fetch tasks when a round is dropped mid-flight
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuoteFetcher {
    source_timeout: Duration,
}

impl QuoteFetcher {
    pub fn new(source_timeout: Duration) -> Self {
        Self { source_timeout }
    }

    pub fn source_timeout(&self) -> Duration {
        self.source_timeout
    }

    /// Fetch every binding concurrently and wait for all of them
    ///
    /// Fewer than two successes is a valid round; deciding what to do with it
    /// is the caller's job. Dropping the returned future aborts the tasks
    /// still in flight.
    pub async fn fetch_all(&self, bindings: &[SourceBinding]) -> FetchRound {
        let limit = self.source_timeout;
        let handles: Vec<_> = bindings
            .iter()
            .map(|binding| {
                let source = Arc::clone(&binding.source);
                let symbol = binding.symbol.clone();
                tokio::spawn(async move {
                    match tokio::time::timeout(limit, source.get_quote(&symbol)).await {
                        Ok(result) => result,
                        Err(_) => Err(SourceError::Timeout(limit.as_millis() as u64)),
                    }
                })
            })
            .collect();
        let _guard = AbortOnDrop(handles.iter().map(|h| h.abort_handle()).collect());

        let joined = join_all(handles).await;

        let mut round = FetchRound::default();
        for (binding, outcome) in bindings.iter().zip(joined) {
            let outcome = outcome.unwrap_or_else(|join_err| Err(SourceError::TaskFailed(join_err.to_string())));
            match outcome {
                Ok(quote) => {
                    debug!(source = %binding.id, bid = %quote.best_bid, ask = %quote.best_ask, "Quote fetched");
                    round.successes.insert(binding.id.clone(), quote);
                }
                Err(err) => {
                    round.failures.insert(binding.id.clone(), err);
                }
            }
        }
        round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_utils::{dec, MockQuoteSource, MockStep};
    use std::time::Instant;

    fn bind(source: MockQuoteSource) -> SourceBinding {
        SourceBinding::new(Arc::new(source), "BTC-USD")
    }

    #[test]
    fn test_binding_identity_is_venue_and_symbol() {
        let binding = bind(MockQuoteSource::fixed("alpha", dec("1"), dec("2")));
        assert_eq!(binding.id.as_str(), "alpha:BTC-USD");
    }

    #[tokio::test]
    async fn test_all_sources_succeed() {
        let fetcher = QuoteFetcher::new(Duration::from_secs(1));
        let bindings = vec![
            bind(MockQuoteSource::fixed("alpha", dec("100"), dec("101"))),
            bind(MockQuoteSource::fixed("beta", dec("102"), dec("103"))),
        ];

        let round = fetcher.fetch_all(&bindings).await;

        assert_eq!(round.successes.len(), 2);
        assert!(round.failures.is_empty());
        assert_eq!(round.quote(&bindings[1].id).unwrap().best_bid, dec("102"));
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_source() {
        let fetcher = QuoteFetcher::new(Duration::from_secs(1));
        let bindings = vec![
            bind(MockQuoteSource::failing("alpha")),
            bind(MockQuoteSource::fixed("beta", dec("102"), dec("103"))),
        ];

        let round = fetcher.fetch_all(&bindings).await;

        assert_eq!(round.successes.len(), 1);
        assert!(round.successes.contains_key(&bindings[1].id));
        assert!(matches!(
            round.failures.get(&bindings[0].id),
            Some(SourceError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_source_times_out_without_holding_the_round() {
        let fetcher = QuoteFetcher::new(Duration::from_millis(50));
        let bindings = vec![
            bind(MockQuoteSource::new(
                "slow",
                Vec::new(),
                MockStep::Delay(Duration::from_secs(30), dec("1"), dec("2")),
            )),
            bind(MockQuoteSource::fixed("fast", dec("1"), dec("2"))),
        ];

        let started = Instant::now();
        let round = fetcher.fetch_all(&bindings).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(round.failures.get(&bindings[0].id), Some(SourceError::Timeout(50))));
        assert!(round.successes.contains_key(&bindings[1].id));
    }

    #[tokio::test]
    async fn test_panicking_source_becomes_task_failure() {
        let fetcher = QuoteFetcher::new(Duration::from_secs(1));
        let bindings = vec![
            bind(MockQuoteSource::new("boom", Vec::new(), MockStep::Panic)),
            bind(MockQuoteSource::fixed("ok", dec("1"), dec("2"))),
        ];

        let round = fetcher.fetch_all(&bindings).await;

        assert!(matches!(round.failures.get(&bindings[0].id), Some(SourceError::TaskFailed(_))));
        assert_eq!(round.successes.len(), 1);
    }

    #[tokio::test]
    async fn test_sources_are_fetched_concurrently() {
        let fetcher = QuoteFetcher::new(Duration::from_secs(5));
        let delay = Duration::from_millis(200);
        let bindings = vec![
            bind(MockQuoteSource::new("a", Vec::new(), MockStep::Delay(delay, dec("1"), dec("2")))),
            bind(MockQuoteSource::new("b", Vec::new(), MockStep::Delay(delay, dec("1"), dec("2")))),
            bind(MockQuoteSource::new("c", Vec::new(), MockStep::Delay(delay, dec("1"), dec("2")))),
        ];

        let started = Instant::now();
        let round = fetcher.fetch_all(&bindings).await;

        assert_eq!(round.successes.len(), 3);
        // Sequential would take 600ms
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_empty_bindings_yield_empty_round() {
        let round = QuoteFetcher::new(Duration::from_secs(1)).fetch_all(&[]).await;
        assert!(round.successes.is_empty());
        assert!(round.failures.is_empty());
    }
}
