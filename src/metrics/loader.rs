//! Load company fundamentals and price quotes from CSV
//!
//! Fundamentals columns:
//! `ticker,revenue,operating_cash_flow,capex,total_debt,cash,shares_outstanding,growth_rate,wacc,has_moat`
//! (an empty cell means the collaborator has no value stored).
//!
//! Price columns: `ticker,price`

use super::CompanyFundamentals;
use crate::error::{Result, VultureError};
use csv::Reader;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the fundamentals columns
///
/// Decimal cells are parsed from their text so no value passes through `f64`.
#[derive(Debug, serde::Deserialize)]
struct FundamentalsRow {
    ticker: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    revenue: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    operating_cash_flow: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    capex: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    total_debt: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    cash: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    shares_outstanding: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    growth_rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    wacc: Option<Decimal>,
    has_moat: Option<bool>,
}

impl FundamentalsRow {
    fn into_fundamentals(self, row: usize) -> Result<CompanyFundamentals> {
        let ticker = normalise_ticker(&self.ticker, row)?;

        Ok(CompanyFundamentals {
            ticker,
            revenue: self.revenue,
            operating_cash_flow: self.operating_cash_flow,
            capex: self.capex,
            total_debt: self.total_debt,
            cash: self.cash,
            shares_outstanding: self.shares_outstanding,
            growth_rate: self.growth_rate,
            wacc: self.wacc,
            has_moat: self.has_moat,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct PriceRow {
    ticker: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    price: Option<Decimal>,
}

/// Upper-case and trim a ticker, rejecting blanks
pub(crate) fn normalise_ticker(raw: &str, row: usize) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(VultureError::EmptyTicker { row });
    }
    Ok(ticker)
}

/// Load all company fundamentals from a CSV file
pub fn load_fundamentals<P: AsRef<Path>>(path: P) -> Result<Vec<CompanyFundamentals>> {
    let reader = Reader::from_path(path)?;
    read_fundamentals(reader)
}

/// Load company fundamentals from any reader (e.g. string buffer, stdin)
pub fn load_fundamentals_from_reader<R: Read>(reader: R) -> Result<Vec<CompanyFundamentals>> {
    read_fundamentals(Reader::from_reader(reader))
}

fn read_fundamentals<R: Read>(mut reader: Reader<R>) -> Result<Vec<CompanyFundamentals>> {
    let mut companies = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: FundamentalsRow = result?;
        companies.push(row.into_fundamentals(idx + 1)?);
    }

    log::debug!("loaded fundamentals for {} companies", companies.len());
    Ok(companies)
}

/// Load current prices keyed by upper-case ticker
///
/// A blank price cell is recorded as 0 ("no price available").
pub fn load_prices<P: AsRef<Path>>(path: P) -> Result<HashMap<String, Decimal>> {
    let reader = Reader::from_path(path)?;
    read_prices(reader)
}

/// Load current prices from any reader
pub fn load_prices_from_reader<R: Read>(reader: R) -> Result<HashMap<String, Decimal>> {
    read_prices(Reader::from_reader(reader))
}

fn read_prices<R: Read>(mut reader: Reader<R>) -> Result<HashMap<String, Decimal>> {
    let mut prices = HashMap::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: PriceRow = result?;
        let ticker = normalise_ticker(&row.ticker, idx + 1)?;
        prices.insert(ticker, row.price.unwrap_or_default());
    }

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FUNDAMENTALS: &str = "\
ticker,revenue,operating_cash_flow,capex,total_debt,cash,shares_outstanding,growth_rate,wacc,has_moat
aapl,1000000,300000,50000,100000,200000,100,15,10,true
xyz,,,,,,,,,
";

    #[test]
    fn test_load_fundamentals() {
        let companies = load_fundamentals_from_reader(FUNDAMENTALS.as_bytes()).unwrap();
        assert_eq!(companies.len(), 2);

        let aapl = &companies[0];
        assert_eq!(aapl.ticker, "AAPL");
        assert_eq!(aapl.operating_cash_flow, Some(dec!(300000)));
        assert_eq!(aapl.growth_rate, Some(dec!(15)));
        assert_eq!(aapl.has_moat, Some(true));

        let xyz = &companies[1];
        assert_eq!(xyz.ticker, "XYZ");
        assert!(xyz.revenue.is_none());
        assert!(xyz.has_moat.is_none());
    }

    #[test]
    fn test_blank_ticker_is_rejected() {
        let csv = "ticker,revenue,operating_cash_flow,capex,total_debt,cash,shares_outstanding,growth_rate,wacc,has_moat\n ,1,1,1,1,1,1,1,1,true\n";
        let err = load_fundamentals_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, VultureError::EmptyTicker { row: 1 }));
    }

    #[test]
    fn test_load_prices() {
        let csv = "ticker,price\nmsft,410.25\nbtc,\n";
        let prices = load_prices_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(prices["MSFT"], dec!(410.25));
        assert_eq!(prices["BTC"], Decimal::ZERO);
    }

    #[test]
    fn test_decimals_keep_every_digit() {
        let csv = "ticker,price\nx,1234567890.123456789012345\nz,100.000000000000000001\n";
        let prices = load_prices_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(prices["X"], dec!(1234567890.123456789012345));
        assert_eq!(prices["Z"], dec!(100.000000000000000001));

        let csv = "ticker,revenue,operating_cash_flow,capex,total_debt,cash,shares_outstanding,growth_rate,wacc,has_moat\n\
                   ko,45754000000.000000000001,,,,,,12.345678901234567891,,\n";
        let companies = load_fundamentals_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(companies[0].revenue, Some(dec!(45754000000.000000000001)));
        assert_eq!(companies[0].growth_rate, Some(dec!(12.345678901234567891)));
        assert!(companies[0].cash.is_none());
    }

    #[test]
    fn test_malformed_decimal_is_a_csv_error() {
        let csv = "ticker,price\nmsft,four hundred\n";
        let err = load_prices_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, VultureError::Csv(_)));
    }
}
