//! Fee-aware arbitrage evaluation between two quotes
//!
//! Pure computation: no I/O and no shared state.
//!
//! # Formula
//! For each direction (buy on X, sell on Y):
//! - `cost    = ask_X * (1 + fee)`
//! - `revenue = bid_Y * (1 - fee)`
//! - `profit  = revenue - cost`
//! - `pct     = profit / cost * 100`
//!
//! The direction with the strictly greater `pct` wins; an exact tie selects
//! B→A.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::types::{Quote, SourceId};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Core Types
// =============================================================================

/// Trade direction of an arbitrage result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Buy on source A (at its ask), sell on source B (at its bid)
    AToB,
    /// Buy on source B (at its ask), sell on source A (at its bid)
    BToA,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::AToB => write!(f, "A_TO_B"),
            Direction::BToA => write!(f, "B_TO_A"),
        }
    }
}

/// Profit of a single buy/sell leg pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegProfit {
    pub profit_absolute: Decimal,
    pub profit_percent: Decimal,
}

/// Best of the two directional opportunities for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageResult {
    /// Revenue minus cost per unit, in quote currency
    pub profit_absolute: Decimal,
    /// Profit relative to the fee-inclusive cost basis, in percent
    pub profit_percent: Decimal,
    pub direction: Direction,
    pub buy_source: SourceId,
    pub sell_source: SourceId,
}

impl ArbitrageResult {
    /// True when the selected direction clears fees
    pub fn is_profitable(&self) -> bool {
        self.profit_percent > Decimal::ZERO
    }
}

/// Evaluation failures; each one skips the tick without ending the run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// Cost basis was zero or negative, so the percentage is undefined
    #[error("Invalid quote from {source_id}: non-positive cost basis {cost_basis}")]
    InvalidQuote {
        source_id: SourceId,
        cost_basis: Decimal,
    },

    /// Fee rate outside [0, 1)
    #[error("Fee rate must be >= 0 and < 1 (got {0})")]
    InvalidFeeRate(Decimal),

    /// Decimal arithmetic overflowed on extreme prices
    #[error("Arithmetic overflow evaluating quote from {0}")]
    Overflow(SourceId),
}

// =============================================================================
// ArbitrageEvaluator
// =============================================================================

/// Fee-aware evaluator for one quote pair
#[derive(Debug, Clone, Copy)]
pub struct ArbitrageEvaluator {
    fee_rate: Decimal,
}

impl ArbitrageEvaluator {
    /// Create an evaluator; `fee_rate` must lie in [0, 1)
    pub fn new(fee_rate: Decimal) -> Result<Self, EvaluationError> {
        if fee_rate < Decimal::ZERO || fee_rate >= Decimal::ONE {
            return Err(EvaluationError::InvalidFeeRate(fee_rate));
        }
        Ok(Self { fee_rate })
    }

    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    /// Evaluate both directions and return the better one
    ///
    /// # Errors
    /// `InvalidQuote` when either ask yields a non-positive cost basis.
    pub fn evaluate(&self, quote_a: &Quote, quote_b: &Quote) -> Result<ArbitrageResult, EvaluationError> {
        // Direction A→B: buy on A at ask_a, sell on B at bid_b
        let a_to_b = leg_profit(quote_a, quote_b, self.fee_rate)?;
        // Direction B→A: buy on B at ask_b, sell on A at bid_a
        let b_to_a = leg_profit(quote_b, quote_a, self.fee_rate)?;

        if a_to_b.profit_percent > b_to_a.profit_percent {
            Ok(ArbitrageResult {
                profit_absolute: a_to_b.profit_absolute,
                profit_percent: a_to_b.profit_percent,
                direction: Direction::AToB,
                buy_source: quote_a.source_id.clone(),
                sell_source: quote_b.source_id.clone(),
            })
        } else {
            // Equal percentages select B→A
            Ok(ArbitrageResult {
                profit_absolute: b_to_a.profit_absolute,
                profit_percent: b_to_a.profit_percent,
                direction: Direction::BToA,
                buy_source: quote_b.source_id.clone(),
                sell_source: quote_a.source_id.clone(),
            })
        }
    }
}

/// Fee-adjusted profit of buying at `buy.best_ask` and selling at `sell.best_bid`
pub fn leg_profit(buy: &Quote, sell: &Quote, fee_rate: Decimal) -> Result<LegProfit, EvaluationError> {
    let overflow = || EvaluationError::Overflow(buy.source_id.clone());

    let buy_cost = buy
        .best_ask
        .checked_mul(Decimal::ONE + fee_rate)
        .ok_or_else(overflow)?;
    if buy_cost <= Decimal::ZERO {
        return Err(EvaluationError::InvalidQuote {
            source_id: buy.source_id.clone(),
            cost_basis: buy_cost,
        });
    }

    let sell_revenue = sell
        .best_bid
        .checked_mul(Decimal::ONE - fee_rate)
        .ok_or_else(|| EvaluationError::Overflow(sell.source_id.clone()))?;
    let profit_absolute = sell_revenue.checked_sub(buy_cost).ok_or_else(overflow)?;
    let profit_percent = profit_absolute
        .checked_div(buy_cost)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(overflow)?;

    Ok(LegProfit {
        profit_absolute,
        profit_percent,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
