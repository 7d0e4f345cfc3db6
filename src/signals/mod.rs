//! Price-dependent signals: margin of safety and vulture status

mod margin;
mod status;

pub use margin::calculate_margin_of_safety;
pub use status::{classify, VultureStatus, HIGH_LEVERAGE_DEBT_TO_EQUITY, STRONG_BUY_MARGIN};
