//! Value every company in a fundamentals file
//!
//! Each ticker is an independent engine call, so the block is valued in
//! parallel. Writes one CSV row per ticker and prints a status summary.
//!
//! Accepts config via environment variables:
//!   VULTURE_INPUT (default data/fundamentals.csv)
//!   VULTURE_PRICES (default data/prices.csv)
//!   VULTURE_OUTPUT (default block_valuation_output.csv)

use anyhow::{Context, Result};
use chrono::Utc;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::env;
use std::time::Instant;
use vulture_valuation::metrics::{load_fundamentals, load_prices};
use vulture_valuation::{
    value_company, AssumptionOverrides, ValuationDefaults, ValuationReport, VultureStatus,
};

/// Flat output row for the block report
#[derive(Debug, serde::Serialize)]
struct OutputRow<'a> {
    ticker: &'a str,
    intrinsic_value: f64,
    current_price: f64,
    price_available: bool,
    margin_of_safety: f64,
    status: VultureStatus,
    fcf: f64,
    enterprise_value: f64,
    equity_value: f64,
    fcf_margin: f64,
    debt_to_equity: f64,
    cash_flow_quality: f64,
    growth_rate: String,
    wacc: String,
    generated_at: &'a str,
}

impl<'a> OutputRow<'a> {
    fn from_report(report: &'a ValuationReport, generated_at: &'a str) -> Self {
        Self {
            ticker: &report.ticker,
            intrinsic_value: report.dcf.intrinsic_value,
            current_price: report.current_price,
            price_available: report.price_available,
            margin_of_safety: report.margin_of_safety,
            status: report.status,
            fcf: report.dcf.fcf,
            enterprise_value: report.dcf.enterprise_value,
            equity_value: report.dcf.equity_value,
            fcf_margin: report.dcf.fcf_margin,
            debt_to_equity: report.dcf.debt_to_equity,
            cash_flow_quality: report.dcf.cash_flow_quality,
            growth_rate: report.growth_rate.to_string(),
            wacc: report.wacc.to_string(),
            generated_at,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).ok().unwrap_or_else(|| default.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let input = env_or("VULTURE_INPUT", "data/fundamentals.csv");
    let prices_path = env_or("VULTURE_PRICES", "data/prices.csv");
    let output_path = env_or("VULTURE_OUTPUT", "block_valuation_output.csv");

    let start = Instant::now();
    println!("Loading fundamentals from {}...", input);

    let companies = load_fundamentals(&input).with_context(|| format!("loading {}", input))?;
    let prices = load_prices(&prices_path).with_context(|| format!("loading {}", prices_path))?;
    println!("Loaded {} companies in {:?}", companies.len(), start.elapsed());

    let defaults = ValuationDefaults::default();
    let overrides = AssumptionOverrides::default();

    println!("Valuing...");
    let value_start = Instant::now();

    let reports: Vec<ValuationReport> = companies
        .par_iter()
        .map(|company| {
            let price = prices.get(&company.ticker).copied().unwrap_or_default();
            value_company(company, price, &defaults, &overrides)
        })
        .collect();

    println!("Valuations complete in {:?}", value_start.elapsed());

    let generated_at = Utc::now().to_rfc3339();
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path))?;
    for report in &reports {
        writer.serialize(OutputRow::from_report(report, &generated_at))?;
    }
    writer.flush()?;

    println!("Output written to {}", output_path);

    let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
    for report in &reports {
        *by_status.entry(report.status.as_str()).or_default() += 1;
    }
    let missing_prices = reports.iter().filter(|r| !r.price_available).count();

    println!("\nBlock Summary ({}):", generated_at);
    for (status, count) in &by_status {
        println!("  {:<26} {:>5}", status, count);
    }
    if missing_prices > 0 {
        println!("  ({} tickers had no price; their status is not meaningful)", missing_prices);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
