//! Discounted cash flow valuation and its sensitivity grid

mod engine;
mod result;
mod sensitivity;

pub use engine::{calculate_dcf, TERMINAL_GROWTH};
pub use result::{DcfResult, FORECAST_YEARS};
pub use sensitivity::{
    generate_sensitivity_matrix, SensitivityCell, SensitivityMatrix, SENSITIVITY_STEPS,
};
