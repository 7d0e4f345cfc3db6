//! Five-year discounted cash flow model
//!
//! The whole chain (projection, discounting, terminal value, equity bridge)
//! runs on `Decimal`. Decimal arithmetic cannot express a zero terminal
//! spread or results beyond its 96-bit mantissa; those inputs are evaluated
//! with the same model in `f64`, which diverges to infinity the way an
//! unbounded number would.

use super::result::{DcfResult, FORECAST_YEARS};
use crate::metrics::FinancialMetrics;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Perpetual growth rate applied after the forecast horizon
pub const TERMINAL_GROWTH: Decimal = dec!(0.02);

/// Calculate the DCF valuation for a set of metrics
///
/// Never fails. A `wacc` at or below the 2% terminal growth rate produces an
/// extreme, negative or infinite terminal value; callers that care should
/// check `wacc > 2` first.
pub fn calculate_dcf(metrics: &FinancialMetrics) -> DcfResult {
    if metrics.wacc <= TERMINAL_GROWTH * Decimal::ONE_HUNDRED {
        log::warn!(
            "wacc {}% does not exceed terminal growth of 2%; terminal value is divergent",
            metrics.wacc
        );
    }

    match evaluate_decimal(metrics) {
        Some(result) => result,
        None => {
            log::warn!(
                "decimal DCF chain not representable (growth {}%, wacc {}%); using float evaluation",
                metrics.growth_rate,
                metrics.wacc
            );
            evaluate_float(metrics)
        }
    }
}

fn evaluate_decimal(metrics: &FinancialMetrics) -> Option<DcfResult> {
    let growth = metrics.growth_rate.checked_div(Decimal::ONE_HUNDRED)?;
    let wacc = metrics.wacc.checked_div(Decimal::ONE_HUNDRED)?;
    let growth_factor = Decimal::ONE.checked_add(growth)?;
    let discount_base = Decimal::ONE.checked_add(wacc)?;

    let fcf = metrics.operating_cash_flow.checked_sub(metrics.capex)?;

    let mut projected = [Decimal::ZERO; FORECAST_YEARS];
    let mut current = fcf;
    let mut pv_fcf = Decimal::ZERO;

    for (year, slot) in projected.iter_mut().enumerate() {
        current = current.checked_mul(growth_factor)?;
        *slot = current;

        let discount = Decimal::ONE.checked_div(discount_base.checked_powi(year as i64 + 1)?)?;
        pv_fcf = pv_fcf.checked_add(current.checked_mul(discount)?)?;
    }

    let terminal_fcf = current.checked_mul(Decimal::ONE + TERMINAL_GROWTH)?;
    let terminal_value = terminal_fcf.checked_div(wacc.checked_sub(TERMINAL_GROWTH)?)?;
    let pv_terminal =
        terminal_value.checked_div(discount_base.checked_powi(FORECAST_YEARS as i64)?)?;

    let enterprise_value = pv_fcf.checked_add(pv_terminal)?;
    let equity_value = enterprise_value
        .checked_add(metrics.cash)?
        .checked_sub(metrics.total_debt)?;
    let intrinsic_value = equity_value.checked_div(metrics.effective_shares())?;

    let fcf_margin = percent_of(fcf, metrics.revenue)?;
    let debt_to_equity = percent_of(metrics.total_debt, equity_value)?;
    let cash_flow_quality = percent_of(metrics.operating_cash_flow, metrics.revenue)?;

    Some(DcfResult {
        fcf: to_display(fcf),
        projected_fcf: projected.map(to_display),
        pv_fcf: to_display(pv_fcf),
        terminal_value: to_display(terminal_value),
        pv_terminal: to_display(pv_terminal),
        enterprise_value: to_display(enterprise_value),
        equity_value: to_display(equity_value),
        intrinsic_value: to_display(intrinsic_value),
        fcf_margin: to_display(fcf_margin),
        debt_to_equity: to_display(debt_to_equity),
        cash_flow_quality: to_display(cash_flow_quality),
    })
}

/// `numerator / denominator * 100`, or 0 when the denominator is not positive
fn percent_of(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    numerator
        .checked_div(denominator)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn to_display(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Same model as [`evaluate_decimal`] in binary floating point
fn evaluate_float(metrics: &FinancialMetrics) -> DcfResult {
    let revenue = to_display(metrics.revenue);
    let operating_cash_flow = to_display(metrics.operating_cash_flow);
    let total_debt = to_display(metrics.total_debt);
    let growth = to_display(metrics.growth_rate) / 100.0;
    let wacc = to_display(metrics.wacc) / 100.0;
    let terminal_growth = to_display(TERMINAL_GROWTH);

    let fcf = operating_cash_flow - to_display(metrics.capex);

    let mut projected = [0.0; FORECAST_YEARS];
    let mut current = fcf;
    let mut pv_fcf = 0.0;

    for (year, slot) in projected.iter_mut().enumerate() {
        current *= 1.0 + growth;
        *slot = current;
        pv_fcf += current * (1.0 / (1.0 + wacc).powi(year as i32 + 1));
    }

    let terminal_value = current * (1.0 + terminal_growth) / (wacc - terminal_growth);
    let pv_terminal = terminal_value / (1.0 + wacc).powi(FORECAST_YEARS as i32);

    let enterprise_value = pv_fcf + pv_terminal;
    let equity_value = enterprise_value + to_display(metrics.cash) - total_debt;
    let intrinsic_value = equity_value / to_display(metrics.effective_shares());

    let ratio = |numerator: f64, denominator: f64| {
        if denominator > 0.0 {
            numerator / denominator * 100.0
        } else {
            0.0
        }
    };

    DcfResult {
        fcf,
        projected_fcf: projected,
        pv_fcf,
        terminal_value,
        pv_terminal,
        enterprise_value,
        equity_value,
        intrinsic_value,
        fcf_margin: ratio(fcf, revenue),
        debt_to_equity: ratio(total_debt, equity_value),
        cash_flow_quality: ratio(operating_cash_flow, revenue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_metrics() -> FinancialMetrics {
        FinancialMetrics {
            revenue: dec!(1000000),
            operating_cash_flow: dec!(300000),
            capex: dec!(50000),
            total_debt: dec!(100000),
            cash: dec!(200000),
            shares_outstanding: dec!(100),
            growth_rate: dec!(15),
            wacc: dec!(10),
            current_price: dec!(100),
        }
    }

    #[test]
    fn test_fcf_is_operating_cash_flow_less_capex() {
        let result = calculate_dcf(&sample_metrics());
        assert_eq!(result.fcf, 250000.0);

        // Independent of growth and discount assumptions
        let other = calculate_dcf(&sample_metrics().with_assumptions(dec!(3), dec!(14)));
        assert_eq!(other.fcf, 250000.0);
    }

    #[test]
    fn test_sample_valuation() {
        let result = calculate_dcf(&sample_metrics());

        assert_relative_eq!(result.projected_fcf[0], 287500.0, max_relative = 1e-12);
        assert_relative_eq!(result.pv_fcf, 1431143.7545404872, max_relative = 1e-12);
        assert_relative_eq!(result.terminal_value, 6411201.03515625, max_relative = 1e-12);
        assert_relative_eq!(result.pv_terminal, 3980851.429147444, max_relative = 1e-12);
        assert_relative_eq!(result.equity_value, 5511995.183687931, max_relative = 1e-12);
        assert_relative_eq!(result.intrinsic_value, 55119.95183687931, max_relative = 1e-12);
        assert_relative_eq!(result.fcf_margin, 25.0);
        assert_relative_eq!(result.cash_flow_quality, 30.0);
        assert_relative_eq!(result.debt_to_equity, 1.814225097582408, max_relative = 1e-12);
    }

    #[test]
    fn test_flat_growth_hand_calculation() {
        // FCF of 100 forever at 10%: annuity of 5 years plus 102 / 0.08 terminal
        let metrics = FinancialMetrics {
            operating_cash_flow: dec!(100),
            growth_rate: Decimal::ZERO,
            wacc: dec!(10),
            ..FinancialMetrics::default()
        };
        let result = calculate_dcf(&metrics);

        assert_eq!(result.projected_fcf, [100.0; FORECAST_YEARS]);
        assert_relative_eq!(result.pv_fcf, 379.0786769408448, max_relative = 1e-12);
        assert_relative_eq!(result.terminal_value, 1275.0);
        assert_relative_eq!(result.intrinsic_value, 1170.7533638412677, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_revenue_ratios_are_zero() {
        let metrics = FinancialMetrics {
            revenue: Decimal::ZERO,
            ..sample_metrics()
        };
        let result = calculate_dcf(&metrics);

        assert_eq!(result.fcf_margin, 0.0);
        assert_eq!(result.cash_flow_quality, 0.0);
        assert!(result.intrinsic_value > 0.0);
    }

    #[test]
    fn test_negative_equity_has_zero_leverage_ratio() {
        let metrics = FinancialMetrics {
            operating_cash_flow: dec!(10),
            capex: dec!(50),
            total_debt: dec!(1000000),
            ..sample_metrics()
        };
        let result = calculate_dcf(&metrics);

        assert!(result.equity_value < 0.0);
        assert_eq!(result.debt_to_equity, 0.0);
        assert!(result.intrinsic_value < 0.0);
    }

    #[test]
    fn test_missing_shares_value_whole_company() {
        let per_one = calculate_dcf(&FinancialMetrics {
            shares_outstanding: Decimal::ONE,
            ..sample_metrics()
        });
        let zero = calculate_dcf(&FinancialMetrics {
            shares_outstanding: Decimal::ZERO,
            ..sample_metrics()
        });

        assert_eq!(zero.intrinsic_value, per_one.intrinsic_value);
        assert_eq!(zero.intrinsic_value, zero.equity_value);
    }

    #[test]
    fn test_wacc_at_terminal_growth_diverges() {
        let result = calculate_dcf(&sample_metrics().with_assumptions(dec!(15), dec!(2)));

        assert!(result.terminal_value.is_infinite());
        assert!(result.intrinsic_value.is_infinite());
        assert_eq!(result.fcf, 250000.0);
        assert!(!result.debt_to_equity.is_nan());
        assert_relative_eq!(result.fcf_margin, 25.0);
    }

    #[test]
    fn test_decimal_overflow_falls_back_to_float() {
        // Year 4 free cash flow (8.1e28) is past the decimal range
        let result = calculate_dcf(&FinancialMetrics {
            revenue: Decimal::ZERO,
            operating_cash_flow: Decimal::from_i128_with_scale(10_i128.pow(27), 0),
            capex: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            cash: Decimal::ZERO,
            shares_outstanding: Decimal::ONE,
            growth_rate: dec!(200),
            wacc: dec!(10),
            current_price: Decimal::ZERO,
        });

        assert_relative_eq!(result.fcf, 1e27, max_relative = 1e-12);
        assert_relative_eq!(result.projected_fcf[0], 3e27, max_relative = 1e-12);
        assert_relative_eq!(result.projected_fcf[4], 2.43e29, max_relative = 1e-12);
        assert!(result.terminal_value.is_finite());
        assert!(result.intrinsic_value.is_finite());
        assert!(result.intrinsic_value > 0.0);
        assert_eq!(result.intrinsic_value, result.equity_value);
        assert_eq!(result.fcf_margin, 0.0);
        assert_eq!(result.cash_flow_quality, 0.0);
        assert_eq!(result.debt_to_equity, 0.0);
    }

    #[test]
    fn test_wacc_below_terminal_growth_is_negative() {
        let result = calculate_dcf(&sample_metrics().with_assumptions(dec!(15), dec!(1)));

        assert!(result.terminal_value < 0.0);
        assert!(result.terminal_value.is_finite());
    }
}
