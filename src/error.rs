//! Error types for the I/O edges of the engine
//!
//! The calculation surface is infallible. Only loaders and parsers
//! (CSV input, strategy names, position lots) produce errors.

use thiserror::Error;

/// Errors raised while reading collaborator data or parsing user input
#[derive(Debug, Error)]
pub enum VultureError {
    /// CSV file could not be opened, read or deserialized
    #[error("failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A row was missing its ticker symbol (row is 1-indexed, header excluded)
    #[error("row {row}: ticker must not be empty")]
    EmptyTicker { row: usize },

    /// Allocation strategy name not recognised
    #[error("unknown allocation strategy `{0}` (expected equal, value-weighted or conviction)")]
    UnknownStrategy(String),

    /// A purchase lot with non-positive shares or price
    #[error("invalid lot for {ticker}: shares and price must be positive")]
    InvalidLot { ticker: String },

    /// Lot arithmetic exceeded the range of a decimal
    #[error("lot for {ticker} is too large to value")]
    LotOverflow { ticker: String },
}

pub type Result<T> = std::result::Result<T, VultureError>;
