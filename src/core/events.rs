//! Monitor Event System
//!
//! Structured event types for logging the monitor lifecycle. All events use
//! one schema so a run can be reconstructed from the log stream alone.
//!
//! # Event Types
//!
//! - **MonitorStarted**: Loop entered RUNNING
//! - **TickRecorded**: Observation appended to the series
//! - **TickSkipped**: Tick produced no observation (missing quote, invalid quote)
//! - **SourceFailed**: One source failed during a fetch round
//! - **MonitorStopping**: Cancellation observed
//! - **MonitorStopped**: Summary and series handed to the sinks
//!
//! # Example
//!
//! ```ignore
//! use crate::core::events::{MonitorEvent, log_event};
//!
//! log_event(&MonitorEvent::tick_skipped(12, "insufficient data"));
//! ```

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::adapters::types::Quote;
use crate::core::evaluator::ArbitrageResult;

/// Monitor event types for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEventType {
    MonitorStarted,
    TickRecorded,
    TickSkipped,
    SourceFailed,
    MonitorStopping,
    MonitorStopped,
}

impl fmt::Display for MonitorEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorEventType::MonitorStarted => "MONITOR_STARTED",
            MonitorEventType::TickRecorded => "TICK_RECORDED",
            MonitorEventType::TickSkipped => "TICK_SKIPPED",
            MonitorEventType::SourceFailed => "SOURCE_FAILED",
            MonitorEventType::MonitorStopping => "MONITOR_STOPPING",
            MonitorEventType::MonitorStopped => "MONITOR_STOPPED",
        };
        f.write_str(name)
    }
}

/// Monitor event with all context fields
#[derive(Debug, Clone)]
pub struct MonitorEvent {
    pub event_type: MonitorEventType,
    pub timestamp_ms: u64,
    pub tick: Option<u64>,
    pub source: Option<String>,        // "binance:BTCUSDT", or "a|b" for the pair
    pub direction: Option<String>,     // "A_TO_B" / "B_TO_A"
    pub profit_percent: Option<Decimal>,
    pub threshold: Option<Decimal>,
    pub opportunity: Option<bool>,     // profit_percent > threshold
    pub bid_a: Option<Decimal>,        // pair quotes of a recorded tick
    pub ask_a: Option<Decimal>,
    pub bid_b: Option<Decimal>,
    pub ask_b: Option<Decimal>,
    pub reason: Option<String>,        // skip reason or source error
    pub observations: Option<usize>,
}

impl MonitorEvent {
    /// Create an empty event of `event_type` stamped with the current time
    pub fn new(event_type: MonitorEventType) -> Self {
        Self {
            event_type,
            timestamp_ms: current_timestamp_ms(),
            tick: None,
            source: None,
            direction: None,
            profit_percent: None,
            threshold: None,
            opportunity: None,
            bid_a: None,
            ask_a: None,
            bid_b: None,
            ask_b: None,
            reason: None,
            observations: None,
        }
    }

    pub fn monitor_started(pair: &str, threshold: Decimal) -> Self {
        Self {
            source: Some(pair.to_string()),
            threshold: Some(threshold),
            ..Self::new(MonitorEventType::MonitorStarted)
        }
    }

    pub fn tick_recorded(
        tick: u64,
        quote_a: &Quote,
        quote_b: &Quote,
        result: &ArbitrageResult,
        threshold: Decimal,
    ) -> Self {
        Self {
            tick: Some(tick),
            bid_a: Some(quote_a.best_bid),
            ask_a: Some(quote_a.best_ask),
            bid_b: Some(quote_b.best_bid),
            ask_b: Some(quote_b.best_ask),
            source: Some(format!("buy:{},sell:{}", result.buy_source, result.sell_source)),
            direction: Some(result.direction.to_string()),
            profit_percent: Some(result.profit_percent),
            threshold: Some(threshold),
            opportunity: Some(result.profit_percent > threshold),
            ..Self::new(MonitorEventType::TickRecorded)
        }
    }

    pub fn tick_skipped(tick: u64, reason: impl Into<String>) -> Self {
        Self {
            tick: Some(tick),
            reason: Some(reason.into()),
            ..Self::new(MonitorEventType::TickSkipped)
        }
    }

    pub fn source_failed(tick: u64, source: &str, error: impl fmt::Display) -> Self {
        Self {
            tick: Some(tick),
            source: Some(source.to_string()),
            reason: Some(error.to_string()),
            ..Self::new(MonitorEventType::SourceFailed)
        }
    }

    pub fn monitor_stopping(tick: u64) -> Self {
        Self {
            tick: Some(tick),
            ..Self::new(MonitorEventType::MonitorStopping)
        }
    }

    pub fn monitor_stopped(observations: usize, skipped: u64) -> Self {
        Self {
            observations: Some(observations),
            reason: Some(format!("{} ticks skipped", skipped)),
            ..Self::new(MonitorEventType::MonitorStopped)
        }
    }
}

/// Get current timestamp in milliseconds since Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Log a monitor event using structured tracing fields
///
/// SOURCE_FAILED goes to WARN, TICK_SKIPPED to DEBUG, everything else INFO.
pub fn log_event(event: &MonitorEvent) {
    let event_type = event.event_type.to_string();
    let profit_str = event.profit_percent.map(|p| format!("{:.4}%", p));
    let threshold_str = event.threshold.map(|t| format!("{:.4}%", t));

    match event.event_type {
        MonitorEventType::SourceFailed => {
            warn!(
                event_type = %event_type,
                timestamp = event.timestamp_ms,
                tick = ?event.tick,
                source = ?event.source,
                reason = ?event.reason,
                ""
            );
        }
        MonitorEventType::TickSkipped => {
            debug!(
                event_type = %event_type,
                timestamp = event.timestamp_ms,
                tick = ?event.tick,
                reason = ?event.reason,
                ""
            );
        }
        _ => {
            info!(
                event_type = %event_type,
                timestamp = event.timestamp_ms,
                tick = ?event.tick,
                source = ?event.source,
                direction = ?event.direction,
                profit = ?profit_str,
                threshold = ?threshold_str,
                opportunity = ?event.opportunity,
                bid_a = ?event.bid_a,
                ask_a = ?event.ask_a,
                bid_b = ?event.bid_b,
                ask_b = ?event.ask_b,
                observations = ?event.observations,
                reason = ?event.reason,
                ""
            );
        }
    }
}
