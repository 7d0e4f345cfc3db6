//! Portfolio-level calculations: allocation weights and position performance

mod allocation;
pub mod loader;
mod positions;

pub use allocation::{
    calculate_allocation_weights, AllocationStrategy, Holding, CONVICTION_REST_WEIGHT,
    CONVICTION_TOP_N, CONVICTION_TOP_WEIGHT,
};
pub use loader::{
    load_holdings, load_holdings_from_reader, load_positions, load_positions_from_reader,
};
pub use positions::{PortfolioSummary, Position, PositionPerformance};
