//! Cross-venue spot arbitrage monitor
//!
//! Samples best bid/ask for one asset on two venues, evaluates fee-aware
//! profit in both directions, records the series and summarizes it when the
//! run is cancelled.
//!
//! - `adapters`: quote sources (Binance, Coinbase) and the factory
//! - `core`: evaluator, fetcher, series recorder, monitor loop
//! - `report`: end-of-run sinks (console, JSON)

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod report;

pub use error::AppError;
