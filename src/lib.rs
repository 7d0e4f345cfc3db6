//! Vulture Valuation - deterministic valuation engine for value investing
//!
//! This library provides:
//! - Five-year discounted cash flow (DCF) valuation on decimal arithmetic
//! - Growth / discount-rate sensitivity grids
//! - Margin of safety and "vulture status" classification
//! - Compound annual growth rates and benchmark trailing returns
//! - Portfolio allocation weights (equal, value-weighted, conviction)
//! - Position cost averaging and portfolio performance summaries
//!
//! Every calculation is a pure function with no shared state. Market data,
//! persistence and presentation belong to the caller.

pub mod error;
pub mod metrics;
pub mod dcf;
pub mod signals;
pub mod growth;
pub mod portfolio;
pub mod valuation;

// Re-export commonly used types
pub use error::{Result, VultureError};
pub use metrics::{AssumptionOverrides, CompanyFundamentals, FinancialMetrics, ValuationDefaults};
pub use dcf::{calculate_dcf, generate_sensitivity_matrix, DcfResult, SensitivityMatrix};
pub use signals::{calculate_margin_of_safety, classify, VultureStatus};
pub use growth::{calculate_cagr, TrailingReturns};
pub use portfolio::{calculate_allocation_weights, AllocationStrategy, Holding};
pub use valuation::{value_company, ValuationEngine, ValuationReport};
