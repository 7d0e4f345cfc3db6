//! Load benchmark price histories from CSV
//!
//! Columns: `ticker,name,current,one_month_ago,one_year_ago,three_years_ago,five_years_ago`

use super::PriceHistory;
use crate::error::Result;
use crate::metrics::loader::normalise_ticker;
use csv::Reader;
use std::io::Read;
use std::path::Path;

/// Load all benchmark histories from a CSV file
pub fn load_benchmarks<P: AsRef<Path>>(path: P) -> Result<Vec<PriceHistory>> {
    read_benchmarks(Reader::from_path(path)?)
}

/// Load benchmark histories from any reader
pub fn load_benchmarks_from_reader<R: Read>(reader: R) -> Result<Vec<PriceHistory>> {
    read_benchmarks(Reader::from_reader(reader))
}

fn read_benchmarks<R: Read>(mut reader: Reader<R>) -> Result<Vec<PriceHistory>> {
    let mut histories = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let mut history: PriceHistory = result?;
        history.ticker = normalise_ticker(&history.ticker, idx + 1)?;
        histories.push(history);
    }

    Ok(histories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_benchmarks() {
        let csv = "\
ticker,name,current,one_month_ago,one_year_ago,three_years_ago,five_years_ago
GC=F,Gold (USD/oz),2050,2000,1900,1700,1200
btc,Bitcoin,42000,38000,26000,19000,6500
";
        let histories = load_benchmarks_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].name, "Gold (USD/oz)");
        assert_eq!(histories[1].ticker, "BTC");
        assert_eq!(histories[1].five_years_ago, 6500.0);
    }
}
