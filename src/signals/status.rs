//! Vulture status classification
//!
//! Gates are evaluated in order and the first match wins:
//! 1. no usable valuation -> speculative
//! 2. no moat -> value trap, whatever the price says
//! 3. cheap but leveraged -> caution
//! 4. then plain margin-of-safety bands

use serde::{Deserialize, Serialize};
use std::fmt;

/// Margin of safety (%) above which a stock counts as a bargain
pub const STRONG_BUY_MARGIN: f64 = 20.0;

/// Debt-to-equity (%) above which a bargain is flagged as leveraged
pub const HIGH_LEVERAGE_DEBT_TO_EQUITY: f64 = 50.0;

/// Investment classification of a valued company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VultureStatus {
    #[serde(rename = "SPECULATIVE: Monitor Cash")]
    Speculative,
    #[serde(rename = "VALUE TRAP: No Moat")]
    ValueTrap,
    #[serde(rename = "CAUTION: High Leverage")]
    CautionHighLeverage,
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "FAIR VALUE")]
    FairValue,
    #[serde(rename = "OVERVALUED")]
    Overvalued,
}

impl VultureStatus {
    /// Label shown to users and stored by the persistence layer
    pub fn as_str(&self) -> &'static str {
        match self {
            VultureStatus::Speculative => "SPECULATIVE: Monitor Cash",
            VultureStatus::ValueTrap => "VALUE TRAP: No Moat",
            VultureStatus::CautionHighLeverage => "CAUTION: High Leverage",
            VultureStatus::StrongBuy => "STRONG BUY",
            VultureStatus::FairValue => "FAIR VALUE",
            VultureStatus::Overvalued => "OVERVALUED",
        }
    }
}

impl fmt::Display for VultureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a valuation
///
/// `_current_price` is accepted for parity with the valuation record; the
/// price only matters through `margin_of_safety`.
pub fn classify(
    intrinsic_value: f64,
    _current_price: f64,
    margin_of_safety: f64,
    debt_to_equity: f64,
    has_moat: bool,
) -> VultureStatus {
    if intrinsic_value <= 0.0 {
        return VultureStatus::Speculative;
    }

    if !has_moat {
        return VultureStatus::ValueTrap;
    }

    if margin_of_safety > STRONG_BUY_MARGIN && debt_to_equity > HIGH_LEVERAGE_DEBT_TO_EQUITY {
        return VultureStatus::CautionHighLeverage;
    }

    if margin_of_safety > STRONG_BUY_MARGIN {
        VultureStatus::StrongBuy
    } else if margin_of_safety > 0.0 {
        VultureStatus::FairValue
    } else {
        VultureStatus::Overvalued
    }
}
