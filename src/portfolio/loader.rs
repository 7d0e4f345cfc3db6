//! Load holdings and purchase lots from CSV
//!
//! Holdings columns: `ticker,margin_of_safety`
//!
//! Position columns: `ticker,shares,purchase_price`. Several rows for the
//! same ticker are dollar-cost averaged into one position.

use super::{Holding, Position};
use crate::error::Result;
use crate::metrics::loader::normalise_ticker;
use csv::Reader;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
struct LotRow {
    ticker: String,
    #[serde(with = "rust_decimal::serde::str")]
    shares: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    purchase_price: Decimal,
}

/// Load allocation candidates from a CSV file
pub fn load_holdings<P: AsRef<Path>>(path: P) -> Result<Vec<Holding>> {
    read_holdings(Reader::from_path(path)?)
}

/// Load allocation candidates from any reader
pub fn load_holdings_from_reader<R: Read>(reader: R) -> Result<Vec<Holding>> {
    read_holdings(Reader::from_reader(reader))
}

fn read_holdings<R: Read>(mut reader: Reader<R>) -> Result<Vec<Holding>> {
    let mut holdings = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let mut holding: Holding = result?;
        holding.ticker = normalise_ticker(&holding.ticker, idx + 1)?;
        holdings.push(holding);
    }

    Ok(holdings)
}

/// Load purchase lots from a CSV file and merge them into positions
pub fn load_positions<P: AsRef<Path>>(path: P) -> Result<Vec<Position>> {
    read_positions(Reader::from_path(path)?)
}

/// Load purchase lots from any reader and merge them into positions
pub fn load_positions_from_reader<R: Read>(reader: R) -> Result<Vec<Position>> {
    read_positions(Reader::from_reader(reader))
}

fn read_positions<R: Read>(mut reader: Reader<R>) -> Result<Vec<Position>> {
    let mut positions: Vec<Position> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: LotRow = result?;
        let ticker = normalise_ticker(&row.ticker, idx + 1)?;

        match index.get(&ticker) {
            Some(&i) => positions[i].add_lot(row.shares, row.purchase_price)?,
            None => {
                index.insert(ticker.clone(), positions.len());
                positions.push(Position::open(&ticker, row.shares, row.purchase_price)?);
            }
        }
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VultureError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_holdings() {
        let csv = "ticker,margin_of_safety\naapl,15.5\nmsft,-3\n";
        let holdings = load_holdings_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(holdings, vec![Holding::new("AAPL", 15.5), Holding::new("MSFT", -3.0)]);
    }

    #[test]
    fn test_lots_are_averaged_per_ticker() {
        let csv = "ticker,shares,purchase_price\nAAPL,10,100\nmsft,2,300\naapl,30,120\n";
        let positions = load_positions_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].ticker, "AAPL");
        assert_eq!(positions[0].shares, dec!(40));
        assert_eq!(positions[0].average_cost_basis, dec!(115));
        assert_eq!(positions[1].ticker, "MSFT");
    }

    #[test]
    fn test_lot_decimals_keep_every_digit() {
        let csv = "ticker,shares,purchase_price\nBTC,0.123456789012345678901,64321.987654321012345678\n";
        let positions = load_positions_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(positions[0].shares, dec!(0.123456789012345678901));
        assert_eq!(positions[0].average_cost_basis, dec!(64321.987654321012345678));
    }

    #[test]
    fn test_oversized_lot_is_an_error() {
        let csv = "ticker,shares,purchase_price\nAAPL,1000000000000000,1000000000000000\n";
        let err = load_positions_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, VultureError::LotOverflow { ref ticker } if ticker == "AAPL"));
    }

    #[test]
    fn test_bad_lot_fails_the_load() {
        let csv = "ticker,shares,purchase_price\nAAPL,0,100\n";
        assert!(load_positions_from_reader(csv.as_bytes()).is_err());
    }
}
