//! Fundamental metrics supplied by the fundamentals collaborator

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Growth rate assumed when the collaborator has none stored (percent)
pub const DEFAULT_GROWTH_RATE: Decimal = dec!(20);

/// Discount rate assumed when the collaborator has none stored (percent)
pub const DEFAULT_WACC: Decimal = dec!(10);

/// Inputs to a single DCF evaluation
///
/// All monetary values are decimals so the valuation chain never passes
/// through binary floating point. Rates are percentages (`20` = 20%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Annual revenue
    pub revenue: Decimal,

    /// Operating cash flow
    pub operating_cash_flow: Decimal,

    /// Capital expenditure (typically positive)
    pub capex: Decimal,

    /// Total debt
    pub total_debt: Decimal,

    /// Cash and equivalents
    pub cash: Decimal,

    /// Shares outstanding. Zero or negative is replaced by 1 at division time,
    /// which makes the intrinsic value a whole-company figure.
    pub shares_outstanding: Decimal,

    /// Forecast growth rate of free cash flow (percent)
    pub growth_rate: Decimal,

    /// Weighted average cost of capital (percent)
    pub wacc: Decimal,

    /// Current market price, 0 when no quote is available
    pub current_price: Decimal,
}

impl FinancialMetrics {
    /// Share count used as the intrinsic value divisor
    pub fn effective_shares(&self) -> Decimal {
        if self.shares_outstanding > Decimal::ZERO {
            self.shares_outstanding
        } else {
            Decimal::ONE
        }
    }

    /// Copy of these metrics with the two model assumptions replaced
    pub fn with_assumptions(&self, growth_rate: Decimal, wacc: Decimal) -> Self {
        Self {
            growth_rate,
            wacc,
            ..self.clone()
        }
    }
}

impl Default for FinancialMetrics {
    fn default() -> Self {
        Self {
            revenue: Decimal::ZERO,
            operating_cash_flow: Decimal::ZERO,
            capex: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            cash: Decimal::ZERO,
            shares_outstanding: Decimal::ONE,
            growth_rate: DEFAULT_GROWTH_RATE,
            wacc: DEFAULT_WACC,
            current_price: Decimal::ZERO,
        }
    }
}

/// Fallback assumptions for companies whose stored data omits them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationDefaults {
    /// Growth rate (percent)
    pub growth_rate: Decimal,

    /// Discount rate (percent)
    pub wacc: Decimal,

    /// Whether a company without a moat flag is treated as having one
    pub has_moat: bool,
}

impl Default for ValuationDefaults {
    fn default() -> Self {
        Self {
            growth_rate: DEFAULT_GROWTH_RATE,
            wacc: DEFAULT_WACC,
            has_moat: true,
        }
    }
}

/// Per-request custom assumptions; `Some` wins over stored values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssumptionOverrides {
    pub growth_rate: Option<Decimal>,
    pub wacc: Option<Decimal>,
}

/// Company record as stored by the fundamentals collaborator
///
/// Every numeric field may be absent. [`CompanyFundamentals::to_metrics`]
/// fills the gaps: money fields become 0, shares become 1 and the
/// assumptions come from [`ValuationDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFundamentals {
    pub ticker: String,
    pub revenue: Option<Decimal>,
    pub operating_cash_flow: Option<Decimal>,
    pub capex: Option<Decimal>,
    pub total_debt: Option<Decimal>,
    pub cash: Option<Decimal>,
    pub shares_outstanding: Option<Decimal>,
    pub growth_rate: Option<Decimal>,
    pub wacc: Option<Decimal>,
    pub has_moat: Option<bool>,
}

impl CompanyFundamentals {
    /// Create an empty record for a ticker (normalised to upper case)
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            ..Default::default()
        }
    }

    /// Growth rate after applying overrides and defaults
    pub fn resolved_growth_rate(
        &self,
        defaults: &ValuationDefaults,
        overrides: &AssumptionOverrides,
    ) -> Decimal {
        overrides
            .growth_rate
            .or(self.growth_rate)
            .unwrap_or(defaults.growth_rate)
    }

    /// Discount rate after applying overrides and defaults
    pub fn resolved_wacc(
        &self,
        defaults: &ValuationDefaults,
        overrides: &AssumptionOverrides,
    ) -> Decimal {
        overrides.wacc.or(self.wacc).unwrap_or(defaults.wacc)
    }

    /// Moat flag after applying defaults
    pub fn resolved_has_moat(&self, defaults: &ValuationDefaults) -> bool {
        self.has_moat.unwrap_or(defaults.has_moat)
    }

    /// Build the engine input for this company at the given price
    pub fn to_metrics(
        &self,
        current_price: Decimal,
        defaults: &ValuationDefaults,
        overrides: &AssumptionOverrides,
    ) -> FinancialMetrics {
        FinancialMetrics {
            revenue: self.revenue.unwrap_or_default(),
            operating_cash_flow: self.operating_cash_flow.unwrap_or_default(),
            capex: self.capex.unwrap_or_default(),
            total_debt: self.total_debt.unwrap_or_default(),
            cash: self.cash.unwrap_or_default(),
            shares_outstanding: self.shares_outstanding.unwrap_or(Decimal::ONE),
            growth_rate: self.resolved_growth_rate(defaults, overrides),
            wacc: self.resolved_wacc(defaults, overrides),
            current_price,
        }
    }
}
