//! DCF output structures

use serde::{Deserialize, Serialize};

/// Number of explicit forecast years in the model
pub const FORECAST_YEARS: usize = 5;

/// Result of a single DCF evaluation
///
/// Values are converted to `f64` only here, after the decimal chain has
/// finished. Ratios are percentages and are 0 whenever their denominator
/// is non-positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfResult {
    /// Free cash flow (operating cash flow - capex)
    pub fcf: f64,

    /// Free cash flow for each forecast year
    pub projected_fcf: [f64; FORECAST_YEARS],

    /// Present value of the projected free cash flows
    pub pv_fcf: f64,

    /// Perpetuity value at the end of the forecast horizon
    pub terminal_value: f64,

    /// Terminal value discounted to today
    pub pv_terminal: f64,

    pub enterprise_value: f64,
    pub equity_value: f64,

    /// Equity value per share
    pub intrinsic_value: f64,

    /// FCF / revenue (%)
    pub fcf_margin: f64,

    /// Total debt / equity value (%)
    pub debt_to_equity: f64,

    /// Operating cash flow / revenue (%)
    pub cash_flow_quality: f64,
}
