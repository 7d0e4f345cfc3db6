//! Growth / discount-rate sensitivity grid
//!
//! Rows run from the highest discount rate down, columns from the lowest
//! growth rate up, so the pessimistic corner is top-left.

use super::engine::calculate_dcf;
use crate::metrics::FinancialMetrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of steps on each axis
pub const SENSITIVITY_STEPS: usize = 5;

/// Offsets applied to the base growth rate (percentage points)
const GROWTH_OFFSETS: [Decimal; SENSITIVITY_STEPS] = [dec!(-5), dec!(-2), dec!(0), dec!(2), dec!(5)];

/// Offsets applied to the base discount rate (percentage points), descending
const WACC_OFFSETS: [Decimal; SENSITIVITY_STEPS] = [dec!(2), dec!(1), dec!(0), dec!(-1), dec!(-2)];

/// One cell of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCell {
    pub growth: Decimal,
    pub wacc: Decimal,
    /// Intrinsic value per share at this growth / wacc pair
    pub value: f64,
}

/// Intrinsic value across 5 growth steps × 5 discount-rate steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityMatrix {
    pub growth_steps: [Decimal; SENSITIVITY_STEPS],
    pub wacc_steps: [Decimal; SENSITIVITY_STEPS],
    /// `matrix[row][col]`: row follows `wacc_steps`, column follows `growth_steps`
    pub matrix: Vec<Vec<SensitivityCell>>,
}

impl SensitivityMatrix {
    /// Cell at the given wacc row and growth column
    pub fn cell(&self, wacc_index: usize, growth_index: usize) -> Option<&SensitivityCell> {
        self.matrix.get(wacc_index)?.get(growth_index)
    }

    /// Cell evaluated at the unshifted base assumptions
    pub fn center(&self) -> Option<&SensitivityCell> {
        self.cell(SENSITIVITY_STEPS / 2, SENSITIVITY_STEPS / 2)
    }
}

/// Re-run the DCF for every growth / wacc combination around a base case
///
/// Each of the 25 cells is an independent full DCF evaluation; the other
/// metrics are taken unchanged from `metrics`. Steps saturate at the decimal
/// range.
pub fn generate_sensitivity_matrix(
    metrics: &FinancialMetrics,
    base_growth: Decimal,
    base_wacc: Decimal,
) -> SensitivityMatrix {
    let growth_steps = GROWTH_OFFSETS.map(|offset| base_growth.saturating_add(offset));
    let wacc_steps = WACC_OFFSETS.map(|offset| base_wacc.saturating_add(offset));

    log::debug!(
        "sensitivity grid: growth {}..{}%, wacc {}..{}%",
        growth_steps[0],
        growth_steps[SENSITIVITY_STEPS - 1],
        wacc_steps[0],
        wacc_steps[SENSITIVITY_STEPS - 1]
    );

    let matrix = wacc_steps
        .iter()
        .map(|&wacc| {
            growth_steps
                .iter()
                .map(|&growth| SensitivityCell {
                    growth,
                    wacc,
                    value: calculate_dcf(&metrics.with_assumptions(growth, wacc)).intrinsic_value,
                })
                .collect()
        })
        .collect();

    SensitivityMatrix {
        growth_steps,
        wacc_steps,
        matrix,
    }
}
