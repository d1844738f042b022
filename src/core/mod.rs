//! Core module - evaluation, fetching, series recording, monitor loop
//!
//! This module uses **explicit re-exports** instead of glob exports
//! (`pub use module::*`) so the public API only grows on purpose.
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use crate::core::{ArbitrageEvaluator, MonitorLoop, SeriesRecorder};
//! ```

pub mod evaluator;
pub mod events;
pub mod fetcher;
pub mod monitor;
pub mod series;

// Explicit re-exports for evaluator module
pub use evaluator::{leg_profit, ArbitrageEvaluator, ArbitrageResult, Direction, EvaluationError, LegProfit};

// Explicit re-exports for events module
pub use events::{log_event, MonitorEvent, MonitorEventType};

// Explicit re-exports for fetcher module
pub use fetcher::{FetchRound, QuoteFetcher, SourceBinding};

// Explicit re-exports for monitor module
pub use monitor::{MonitorError, MonitorLoop, MonitorState, RunReport, TickOutcome, TickSkip};

// Explicit re-exports for series module
pub use series::{Observation, Series, SeriesRecorder, Summary};
