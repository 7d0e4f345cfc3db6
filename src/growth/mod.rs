//! Growth statistics: CAGR and benchmark trailing returns

mod benchmark;
mod cagr;
pub mod loader;

pub use benchmark::{BenchmarkReport, PriceHistory, TrailingReturns};
pub use cagr::{calculate_cagr, CAGR_CEILING};
pub use loader::{load_benchmarks, load_benchmarks_from_reader};
