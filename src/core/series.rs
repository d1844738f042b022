//! Append-only time series of monitoring observations
//!
//! `SeriesRecorder` is owned by the monitor loop and written only from its
//! control task, one append per successful tick, so it carries no lock.
//! Snapshots handed out by `export()` are shared immutable slices; later
//! appends never change a snapshot already taken.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::adapters::types::{Quote, SourceId};
use crate::core::evaluator::ArbitrageResult;

// =============================================================================
// Observation / Series
// =============================================================================

/// One tick's quotes and the evaluated opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub quotes: BTreeMap<SourceId, Quote>,
    pub result: ArbitrageResult,
}

impl Observation {
    /// Build an observation from the evaluated pair
    pub fn new(timestamp: DateTime<Utc>, quote_a: Quote, quote_b: Quote, result: ArbitrageResult) -> Self {
        let mut quotes = BTreeMap::new();
        quotes.insert(quote_a.source_id.clone(), quote_a);
        quotes.insert(quote_b.source_id.clone(), quote_b);
        Self {
            timestamp,
            quotes,
            result,
        }
    }
}

/// Immutable snapshot of the recorded observations, in sampling order
///
/// Serializes as a plain JSON array of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Series(Arc<[Observation]>);

impl Series {
    pub fn observations(&self) -> &[Observation] {
        &self.0
    }
}

impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let observations = Vec::<Observation>::deserialize(deserializer)?;
        Ok(Series(Arc::from(observations)))
    }
}

impl Deref for Series {
    type Target = [Observation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Aggregate statistics over a series
///
/// On an empty series `count` is 0 and the mean / max are reported as 0
/// rather than NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean_profit_percent: Decimal,
    pub max_profit_percent: Decimal,
    #[serde(skip)]
    profit_percents: Vec<Decimal>,
    #[serde(skip)]
    average_spreads: BTreeMap<SourceId, Decimal>,
}

impl Summary {
    /// Number of observations whose profit percent is strictly above `threshold`
    pub fn count_above_threshold(&self, threshold: Decimal) -> usize {
        self.profit_percents.iter().filter(|pct| **pct > threshold).count()
    }

    /// Mean bid/ask spread recorded for `source`, if it appears in the series
    pub fn average_spread(&self, source: &SourceId) -> Option<Decimal> {
        self.average_spreads.get(source).copied()
    }

    /// Sources seen in the series, in key order
    pub fn sources(&self) -> impl Iterator<Item = &SourceId> {
        self.average_spreads.keys()
    }
}

/// Mean of `values` that never panics
///
/// Sums exactly when the total fits in a `Decimal`; otherwise averages
/// `value / n` terms, which stay within the bounds of the inputs.
fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let n = Decimal::from(values.len());
    let exact = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value));
    match exact {
        Some(total) => total / n,
        None => values
            .iter()
            .fold(Decimal::ZERO, |acc, value| acc.saturating_add(*value / n)),
    }
}

// =============================================================================
// SeriesRecorder
// =============================================================================

/// Append-only store of observations for one monitoring run
#[derive(Debug, Default)]
pub struct SeriesRecorder {
    observations: Vec<Observation>,
}

impl SeriesRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation (amortized O(1)); never reorders or removes
    pub fn append(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Compute statistics over the full series at call time
    pub fn summarize(&self) -> Summary {
        let profit_percents: Vec<Decimal> = self
            .observations
            .iter()
            .map(|obs| obs.result.profit_percent)
            .collect();

        let mut spreads: BTreeMap<SourceId, Vec<Decimal>> = BTreeMap::new();
        for quote in self.observations.iter().flat_map(|obs| obs.quotes.values()) {
            spreads
                .entry(quote.source_id.clone())
                .or_default()
                .push(quote.spread());
        }
        let average_spreads = spreads
            .into_iter()
            .map(|(source, values)| (source, mean(&values)))
            .collect();

        let max_profit_percent = profit_percents
            .iter()
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO);

        Summary {
            count: profit_percents.len(),
            mean_profit_percent: mean(&profit_percents),
            max_profit_percent,
            profit_percents,
            average_spreads,
        }
    }

    /// Snapshot of the series; unaffected by later appends
    pub fn export(&self) -> Series {
        Series(Arc::from(self.observations.clone()))
    }
}
