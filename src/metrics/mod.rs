//! Company fundamentals, engine inputs and their CSV loader

mod data;
pub mod loader;

pub use data::{
    AssumptionOverrides, CompanyFundamentals, FinancialMetrics, ValuationDefaults,
    DEFAULT_GROWTH_RATE, DEFAULT_WACC,
};
pub use loader::{load_fundamentals, load_fundamentals_from_reader, load_prices, load_prices_from_reader};
