//! Shared test utilities for quote source testing
//!
//! Provides a scriptable `MockQuoteSource` used by the fetcher, monitor and
//! report test modules instead of per-module duplicates.

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::adapters::errors::{SourceError, SourceResult};
use crate::adapters::traits::QuoteSource;
use crate::adapters::types::{Quote, SourceId};

/// Parse a decimal literal (test helper)
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Build a quote with the current timestamp
pub fn quote(source: &str, bid: &str, ask: &str) -> Quote {
    Quote::new(SourceId::from(source), dec(bid), dec(ask), Utc::now())
}

/// What the mock does on one `get_quote` call
#[derive(Debug, Clone)]
pub enum MockStep {
    /// Return a quote with this bid / ask
    Respond(Decimal, Decimal),
    /// Return `SourceError::InvalidResponse`
    Fail,
    /// Sleep, then respond
    Delay(Duration, Decimal, Decimal),
    /// Panic inside the fetch
    Panic,
}

/// Scriptable quote source for tests
///
/// Steps are consumed in order; once the script is exhausted the
/// `fallback` step repeats forever.
pub struct MockQuoteSource {
    pub name: &'static str,
    script: Mutex<VecDeque<MockStep>>,
    fallback: MockStep,
    calls: AtomicUsize,
}

impl MockQuoteSource {
    pub fn new(name: &'static str, script: Vec<MockStep>, fallback: MockStep) -> Self {
        Self {
            name,
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always respond with the same bid / ask
    pub fn fixed(name: &'static str, bid: Decimal, ask: Decimal) -> Self {
        Self::new(name, Vec::new(), MockStep::Respond(bid, ask))
    }

    /// Always fail
    pub fn failing(name: &'static str) -> Self {
        Self::new(name, Vec::new(), MockStep::Fail)
    }

    /// Number of `get_quote` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> MockStep {
        let mut script = self.script.lock().unwrap();
        script.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn get_quote(&self, symbol: &str) -> SourceResult<Quote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = SourceId::for_venue(self.name, symbol);
        match self.next_step() {
            MockStep::Respond(bid, ask) => Ok(Quote::new(id, bid, ask, Utc::now())),
            MockStep::Fail => Err(SourceError::InvalidResponse(format!(
                "{} scripted failure",
                self.name
            ))),
            MockStep::Delay(delay, bid, ask) => {
                tokio::time::sleep(delay).await;
                Ok(Quote::new(id, bid, ask, Utc::now()))
            }
            MockStep::Panic => panic!("{} scripted panic", self.name),
        }
    }

    fn venue_name(&self) -> &'static str {
        self.name
    }
}
