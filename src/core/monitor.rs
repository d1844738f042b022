//! Monitor loop: poll, evaluate, record, sleep, until cancelled
//!
//! # State machine
//!
//! ```text
//! RUNNING --cancel--> STOPPING --summary handed to sinks--> STOPPED
//! ```
//!
//! - Each tick fetches every source, evaluates the canonical pair (A, B) when
//!   both quotes arrived, appends one observation, then sleeps for the poll
//!   interval whether or not the tick produced anything.
//! - Cancellation is raced against both the in-flight fetch and the sleep, so
//!   it is observed immediately. An abandoned round appends nothing.
//! - STOPPED is terminal: `run` consumes the loop.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::adapters::types::SourceId;
use crate::config::{MonitorSettings, REQUIRED_SOURCE_COUNT};
use crate::core::evaluator::{ArbitrageEvaluator, ArbitrageResult, EvaluationError};
use crate::core::events::{log_event, MonitorEvent};
use crate::core::fetcher::{QuoteFetcher, SourceBinding};
use crate::core::series::{Observation, Series, SeriesRecorder, Summary};
use crate::report::ReportSink;

// =============================================================================
// State / Errors
// =============================================================================

/// Lifecycle state published on the watch channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorState {
    Running,
    Stopping,
    Stopped,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorState::Running => write!(f, "RUNNING"),
            MonitorState::Stopping => write!(f, "STOPPING"),
            MonitorState::Stopped => write!(f, "STOPPED"),
        }
    }
}

/// Errors raised while building a monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Monitor requires exactly {expected} sources, got {actual}")]
    SourceCount { expected: usize, actual: usize },

    #[error("Duplicate source identity: {0}")]
    DuplicateSource(SourceId),

    #[error("Invalid evaluator settings: {0}")]
    Evaluator(#[from] EvaluationError),
}

/// Why a tick produced no observation
#[derive(Debug, Clone, PartialEq)]
pub enum TickSkip {
    /// One or both quotes of the pair are missing this round
    InsufficientData { missing: Vec<SourceId> },
    /// The pair was fetched but could not be evaluated
    InvalidQuote(EvaluationError),
}

impl fmt::Display for TickSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickSkip::InsufficientData { missing } => {
                let ids: Vec<&str> = missing.iter().map(SourceId::as_str).collect();
                write!(f, "insufficient data (missing {})", ids.join(", "))
            }
            TickSkip::InvalidQuote(err) => write!(f, "{}", err),
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Recorded(ArbitrageResult),
    Skipped(TickSkip),
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: Summary,
    pub series: Series,
    /// Completed ticks, recorded or skipped
    pub ticks: u64,
    pub skipped: u64,
}

// =============================================================================
// MonitorLoop
// =============================================================================

pub struct MonitorLoop {
    pair: [SourceBinding; 2],
    fetcher: QuoteFetcher,
    evaluator: ArbitrageEvaluator,
    poll_interval: Duration,
    threshold: Decimal,
    recorder: SeriesRecorder,
    state_tx: watch::Sender<MonitorState>,
    ticks: u64,
    skipped: u64,
}

impl MonitorLoop {
    /// Build a loop over exactly two bindings; the first is A, the second B
    pub fn new(bindings: Vec<SourceBinding>, settings: &MonitorSettings) -> Result<Self, MonitorError> {
        let actual = bindings.len();
        let pair: [SourceBinding; 2] = bindings.try_into().map_err(|_| MonitorError::SourceCount {
            expected: REQUIRED_SOURCE_COUNT,
            actual,
        })?;
        if pair[0].id == pair[1].id {
            return Err(MonitorError::DuplicateSource(pair[0].id.clone()));
        }

        let (state_tx, _) = watch::channel(MonitorState::Running);
        Ok(Self {
            pair,
            fetcher: QuoteFetcher::new(settings.source_timeout()),
            evaluator: ArbitrageEvaluator::new(settings.fee_rate)?,
            poll_interval: settings.poll_interval(),
            threshold: settings.profit_threshold_pct,
            recorder: SeriesRecorder::new(),
            state_tx,
            ticks: 0,
            skipped: 0,
        })
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> MonitorState {
        *self.state_tx.borrow()
    }

    pub fn recorder(&self) -> &SeriesRecorder {
        &self.recorder
    }

    pub fn pair_label(&self) -> String {
        format!("{}|{}", self.pair[0].id, self.pair[1].id)
    }

    /// Run one tick: fetch, evaluate the pair, append on success
    ///
    /// Source failures are logged and turned into a skip; nothing here is
    /// fatal to the loop. Dropping the future before it resolves abandons the
    /// round without touching the series.
    pub async fn tick(&mut self) -> TickOutcome {
        let round = self.fetcher.fetch_all(&self.pair).await;
        self.ticks += 1;
        let tick = self.ticks;

        for (id, err) in &round.failures {
            log_event(&MonitorEvent::source_failed(tick, id.as_str(), err));
        }

        let [a, b] = &self.pair;
        let outcome = match (round.quote(&a.id), round.quote(&b.id)) {
            (Some(quote_a), Some(quote_b)) => match self.evaluator.evaluate(quote_a, quote_b) {
                Ok(result) => {
                    self.recorder.append(Observation::new(
                        Utc::now(),
                        quote_a.clone(),
                        quote_b.clone(),
                        result.clone(),
                    ));
                    log_event(&MonitorEvent::tick_recorded(
                        tick,
                        quote_a,
                        quote_b,
                        &result,
                        self.threshold,
                    ));
                    TickOutcome::Recorded(result)
                }
                Err(err) => TickOutcome::Skipped(TickSkip::InvalidQuote(err)),
            },
            (quote_a, quote_b) => {
                let missing = [(a, quote_a.is_none()), (b, quote_b.is_none())]
                    .into_iter()
                    .filter(|(_, missing)| *missing)
                    .map(|(binding, _)| binding.id.clone())
                    .collect();
                TickOutcome::Skipped(TickSkip::InsufficientData { missing })
            }
        };

        if let TickOutcome::Skipped(skip) = &outcome {
            self.skipped += 1;
            log_event(&MonitorEvent::tick_skipped(tick, skip.to_string()));
        }
        outcome
    }

    /// Drive ticks until `cancel` fires, then report to `sinks`
    ///
    /// Always returns a report, even when cancelled before the first tick.
    /// A failing sink is logged and the remaining sinks still run.
    pub async fn run(mut self, cancel: CancellationToken, sinks: &mut [Box<dyn ReportSink>]) -> RunReport {
        log_event(&MonitorEvent::monitor_started(&self.pair_label(), self.threshold));

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.tick() => {}
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        self.state_tx.send_replace(MonitorState::Stopping);
        log_event(&MonitorEvent::monitor_stopping(self.ticks));

        let summary = self.recorder.summarize();
        let series = self.recorder.export();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.report(&summary, &series) {
                error!(sink = sink.name(), error = %e, "Report sink failed");
            }
        }

        self.state_tx.send_replace(MonitorState::Stopped);
        log_event(&MonitorEvent::monitor_stopped(series.len(), self.skipped));

        RunReport {
            summary,
            series,
            ticks: self.ticks,
            skipped: self.skipped,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
