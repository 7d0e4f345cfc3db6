//! Held positions, dollar-cost averaging and portfolio performance

use crate::error::{Result, VultureError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A position built up from one or more purchase lots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub shares: Decimal,
    pub average_cost_basis: Decimal,
    pub total_cost_basis: Decimal,
}

impl Position {
    /// Open a position from its first lot
    pub fn open(ticker: &str, shares: Decimal, price: Decimal) -> Result<Self> {
        let ticker = ticker.trim().to_uppercase();
        validate_lot(&ticker, shares, price)?;

        let total_cost_basis = shares
            .checked_mul(price)
            .ok_or_else(|| overflow(&ticker))?;

        Ok(Self {
            ticker,
            shares,
            average_cost_basis: price,
            total_cost_basis,
        })
    }

    /// Add a lot and re-average the cost basis
    ///
    /// The position is left untouched when the lot is rejected.
    pub fn add_lot(&mut self, shares: Decimal, price: Decimal) -> Result<()> {
        validate_lot(&self.ticker, shares, price)?;

        let total_cost_basis = shares
            .checked_mul(price)
            .and_then(|cost| self.total_cost_basis.checked_add(cost))
            .ok_or_else(|| overflow(&self.ticker))?;
        let total_shares = self
            .shares
            .checked_add(shares)
            .ok_or_else(|| overflow(&self.ticker))?;
        let average_cost_basis = total_cost_basis
            .checked_div(total_shares)
            .ok_or_else(|| overflow(&self.ticker))?;

        self.total_cost_basis = total_cost_basis;
        self.shares = total_shares;
        self.average_cost_basis = average_cost_basis;
        Ok(())
    }
}

fn overflow(ticker: &str) -> VultureError {
    VultureError::LotOverflow {
        ticker: ticker.to_string(),
    }
}

fn validate_lot(ticker: &str, shares: Decimal, price: Decimal) -> Result<()> {
    if shares <= Decimal::ZERO || price <= Decimal::ZERO {
        return Err(VultureError::InvalidLot {
            ticker: ticker.to_string(),
        });
    }
    Ok(())
}

/// Performance of a single position at the current price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionPerformance {
    pub ticker: String,
    pub shares: Decimal,
    pub average_cost_basis: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    /// Price change against average cost (%), 0 without a cost basis
    pub gain_percent: f64,
    pub gain_dollar: Decimal,
}

/// Portfolio totals across all positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain: Decimal,
    /// Total gain against total cost (%), 0 without a cost basis
    pub total_gain_percent: f64,
    pub holdings: Vec<PositionPerformance>,
}

impl PortfolioSummary {
    /// Value every position at the supplied prices
    ///
    /// A ticker with no quote is valued at 0, mirroring a failed price lookup.
    pub fn build(positions: &[Position], prices: &HashMap<String, Decimal>) -> Self {
        let mut total_value = Decimal::ZERO;
        let mut total_cost_basis = Decimal::ZERO;
        let mut holdings = Vec::with_capacity(positions.len());

        for position in positions {
            let current_price = prices.get(&position.ticker).copied().unwrap_or_default();
            let market_value = position.shares.saturating_mul(current_price);

            total_value = total_value.saturating_add(market_value);
            total_cost_basis = total_cost_basis.saturating_add(position.total_cost_basis);

            holdings.push(PositionPerformance {
                ticker: position.ticker.clone(),
                shares: position.shares,
                average_cost_basis: position.average_cost_basis,
                current_price,
                market_value,
                gain_percent: percent_change(
                    current_price.saturating_sub(position.average_cost_basis),
                    position.average_cost_basis,
                ),
                gain_dollar: market_value.saturating_sub(position.total_cost_basis),
            });
        }

        let total_gain = total_value.saturating_sub(total_cost_basis);

        Self {
            total_value,
            total_cost_basis,
            total_gain,
            total_gain_percent: percent_change(total_gain, total_cost_basis),
            holdings,
        }
    }
}

fn percent_change(change: Decimal, base: Decimal) -> f64 {
    if base <= Decimal::ZERO {
        return 0.0;
    }
    change
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|percent| percent.to_f64())
        .unwrap_or(0.0)
}
