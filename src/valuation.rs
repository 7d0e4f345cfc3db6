//! Full company valuation: DCF, margin of safety and vulture status in one call
//!
//! Also hosts [`ValuationEngine`], a zero-sized facade over the five engine
//! operations for callers that prefer a single entry point.

use crate::dcf::{calculate_dcf, generate_sensitivity_matrix, DcfResult, SensitivityMatrix};
use crate::growth::calculate_cagr;
use crate::metrics::{AssumptionOverrides, CompanyFundamentals, FinancialMetrics, ValuationDefaults};
use crate::portfolio::{calculate_allocation_weights, AllocationStrategy, Holding};
use crate::signals::{calculate_margin_of_safety, classify, VultureStatus};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the display and persistence layers need for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub ticker: String,

    #[serde(flatten)]
    pub dcf: DcfResult,

    pub margin_of_safety: f64,
    pub status: VultureStatus,
    pub current_price: f64,

    /// False when no quote was supplied. Margin of safety and status are
    /// still computed but meaningless; presentation should gate on this.
    pub price_available: bool,

    /// Assumptions actually used, after overrides and defaults
    pub growth_rate: Decimal,
    pub wacc: Decimal,
    pub has_moat: bool,
}

/// Value one company at the given price
pub fn value_company(
    company: &CompanyFundamentals,
    current_price: Decimal,
    defaults: &ValuationDefaults,
    overrides: &AssumptionOverrides,
) -> ValuationReport {
    let metrics = company.to_metrics(current_price, defaults, overrides);
    let has_moat = company.resolved_has_moat(defaults);

    log::debug!(
        "valuing {} at growth {}%, wacc {}%, moat {}",
        company.ticker,
        metrics.growth_rate,
        metrics.wacc,
        has_moat
    );

    let dcf = calculate_dcf(&metrics);
    let price = current_price.to_f64().unwrap_or(0.0);
    let margin_of_safety = calculate_margin_of_safety(dcf.intrinsic_value, price);
    let status = classify(
        dcf.intrinsic_value,
        price,
        margin_of_safety,
        dcf.debt_to_equity,
        has_moat,
    );

    ValuationReport {
        ticker: company.ticker.clone(),
        dcf,
        margin_of_safety,
        status,
        current_price: price,
        price_available: current_price > Decimal::ZERO,
        growth_rate: metrics.growth_rate,
        wacc: metrics.wacc,
        has_moat,
    }
}

/// Sensitivity grid around a company's stored (or default) assumptions
///
/// The grid does not depend on price, so none is needed.
pub fn sensitivity_for(
    company: &CompanyFundamentals,
    defaults: &ValuationDefaults,
) -> SensitivityMatrix {
    let metrics = company.to_metrics(Decimal::ZERO, defaults, &AssumptionOverrides::default());
    generate_sensitivity_matrix(&metrics, metrics.growth_rate, metrics.wacc)
}

/// Stateless entry point to the valuation operations
///
/// Holds no data; every call is independent and safe to run from any
/// number of threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationEngine;

impl ValuationEngine {
    pub fn dcf(metrics: &FinancialMetrics) -> DcfResult {
        calculate_dcf(metrics)
    }

    pub fn margin_of_safety(intrinsic_value: f64, current_price: f64) -> f64 {
        calculate_margin_of_safety(intrinsic_value, current_price)
    }

    pub fn classify(
        intrinsic_value: f64,
        current_price: f64,
        margin_of_safety: f64,
        debt_to_equity: f64,
        has_moat: bool,
    ) -> VultureStatus {
        classify(intrinsic_value, current_price, margin_of_safety, debt_to_equity, has_moat)
    }

    pub fn cagr(begin_value: f64, end_value: f64, years: f64) -> Option<f64> {
        calculate_cagr(begin_value, end_value, years)
    }

    pub fn sensitivity(
        metrics: &FinancialMetrics,
        base_growth: Decimal,
        base_wacc: Decimal,
    ) -> SensitivityMatrix {
        generate_sensitivity_matrix(metrics, base_growth, base_wacc)
    }

    pub fn allocation_weights(
        holdings: &[Holding],
        strategy: AllocationStrategy,
    ) -> BTreeMap<String, f64> {
        calculate_allocation_weights(holdings, strategy)
    }
}
