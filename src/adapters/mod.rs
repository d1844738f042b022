//! Quote source adapters for Binance and Coinbase
//!
//! This module provides the `QuoteSource` abstraction the monitor polls and
//! the REST implementations behind it.

pub mod binance;
pub mod coinbase;
pub mod errors;
pub mod factory;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use binance::BinanceSource;
pub use coinbase::CoinbaseSource;
pub use errors::{SourceError, SourceResult};
pub use factory::{create_bindings, create_source, AnySource};
pub use traits::QuoteSource;
pub use types::{Quote, SourceId};
