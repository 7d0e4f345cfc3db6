//! Trailing returns for benchmark comparison

use super::cagr::calculate_cagr;
use serde::{Deserialize, Serialize};

/// Price snapshots for one benchmark or asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub ticker: String,
    pub name: String,
    pub current: f64,
    pub one_month_ago: f64,
    pub one_year_ago: f64,
    pub three_years_ago: f64,
    pub five_years_ago: f64,
}

/// Annualised growth over the standard comparison horizons (percent)
///
/// The one-month figure is annualised too (`years = 1/12`), so it swings
/// far more than the longer horizons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailingReturns {
    pub cagr_1m: Option<f64>,
    pub cagr_1y: Option<f64>,
    pub cagr_3y: Option<f64>,
    pub cagr_5y: Option<f64>,
}

impl TrailingReturns {
    pub fn from_history(history: &PriceHistory) -> Self {
        Self {
            cagr_1m: calculate_cagr(history.one_month_ago, history.current, 1.0 / 12.0),
            cagr_1y: calculate_cagr(history.one_year_ago, history.current, 1.0),
            cagr_3y: calculate_cagr(history.three_years_ago, history.current, 3.0),
            cagr_5y: calculate_cagr(history.five_years_ago, history.current, 5.0),
        }
    }
}

/// A benchmark with its computed returns, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    #[serde(flatten)]
    pub history: PriceHistory,
    #[serde(flatten)]
    pub returns: TrailingReturns,
}

impl From<PriceHistory> for BenchmarkReport {
    fn from(history: PriceHistory) -> Self {
        let returns = TrailingReturns::from_history(&history);
        Self { history, returns }
    }
}
