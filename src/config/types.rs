//! Configuration types for the arbitrage monitor
//!
//! This module defines the structs loaded from YAML. The monitor core only
//! consumes the already-validated values (interval, fee rate, threshold and
//! the ordered source list).

use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::constants;
use crate::error::AppError;

/// Number of sources the pairwise comparison works on
pub const REQUIRED_SOURCE_COUNT: usize = 2;

// ============================================================================
// Enums
// ============================================================================

/// Supported price venues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Binance,
    Coinbase,
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Venue::Binance => write!(f, "binance"),
            Venue::Coinbase => write!(f, "coinbase"),
        }
    }
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// One configured price source: a venue plus its venue-specific symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Venue to query
    pub venue: Venue,
    /// Symbol in the venue's own format (e.g. "BTC/USDT", "BTC-USD")
    pub symbol: String,
    /// Override of the venue REST endpoint (defaults from `constants`)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl SourceConfig {
    /// Stable `venue:symbol` label for this source
    pub fn label(&self) -> String {
        format!("{}:{}", self.venue, self.symbol)
    }
}

/// Polling loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Delay between polling rounds (milliseconds)
    pub poll_interval_ms: u64,
    /// Proportional fee per trade, in [0, 1) (e.g. 0.001 = 0.1%)
    pub fee_rate: Decimal,
    /// Profit percentage used by the summary's above-threshold count
    pub profit_threshold_pct: Decimal,
    /// Upper bound on a single source fetch (milliseconds)
    #[serde(default = "constants::default_source_timeout_ms")]
    pub source_timeout_ms: u64,
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    /// Validate loop parameter rules
    pub fn validate(&self) -> Result<(), AppError> {
        if self.poll_interval_ms == 0 {
            return Err(AppError::Config(
                "poll_interval_ms must be > 0".to_string(),
            ));
        }

        if self.source_timeout_ms == 0 {
            return Err(AppError::Config(
                "source_timeout_ms must be > 0".to_string(),
            ));
        }

        // Rule: fee in [0, 1) so (1 - fee) stays positive
        if self.fee_rate < Decimal::ZERO || self.fee_rate >= Decimal::ONE {
            return Err(AppError::Config(format!(
                "fee_rate must be >= 0 and < 1 (got {})",
                self.fee_rate
            )));
        }

        Ok(())
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 30_000,
            fee_rate: Decimal::new(1, 3),
            profit_threshold_pct: Decimal::new(1, 1),
            source_timeout_ms: constants::default_source_timeout_ms(),
        }
    }
}

/// Where the finished run is reported
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Write the exported series as JSON to this path when the run stops
    #[serde(default)]
    pub series_path: Option<PathBuf>,
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub monitor: MonitorSettings,
    /// Ordered source list; the first two form pair (A, B)
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub report: ReportSettings,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.monitor.validate()?;

        // Rule: pairwise design takes exactly two sources
        if self.sources.len() != REQUIRED_SOURCE_COUNT {
            return Err(AppError::Config(format!(
                "Configuration must contain exactly {} sources (got {})",
                REQUIRED_SOURCE_COUNT,
                self.sources.len()
            )));
        }

        for source in &self.sources {
            if source.symbol.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "Source '{}': symbol cannot be empty",
                    source.venue
                )));
            }
        }

        // Rule: source identities must differ
        if self.sources[0].label() == self.sources[1].label() {
            return Err(AppError::Config(format!(
                "Sources cannot be the same (both are {})",
                self.sources[0].label()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
