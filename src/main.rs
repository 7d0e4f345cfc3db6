//! Vulture CLI
//!
//! Command-line front-end over the valuation engine. Reads collaborator data
//! from CSV files and prints tables or JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vulture_valuation::growth::{load_benchmarks, BenchmarkReport};
use vulture_valuation::metrics::{load_fundamentals, load_prices};
use vulture_valuation::portfolio::{load_holdings, load_positions, PortfolioSummary};
use vulture_valuation::valuation::sensitivity_for;
use vulture_valuation::{
    calculate_allocation_weights, value_company, AllocationStrategy, AssumptionOverrides,
    CompanyFundamentals, ValuationDefaults,
};

#[derive(Debug, Parser)]
#[command(name = "vulture", version, about = "DCF valuation and allocation engine")]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Value companies: DCF, margin of safety and vulture status
    Value {
        /// Fundamentals CSV
        #[arg(long, default_value = "data/fundamentals.csv")]
        input: PathBuf,
        /// Prices CSV (ticker,price)
        #[arg(long, default_value = "data/prices.csv")]
        prices: PathBuf,
        /// Only value this ticker
        #[arg(long)]
        ticker: Option<String>,
        /// Override growth rate (percent)
        #[arg(long)]
        growth: Option<Decimal>,
        /// Override discount rate (percent)
        #[arg(long)]
        wacc: Option<Decimal>,
    },
    /// Intrinsic value across growth / discount-rate steps
    Sensitivity {
        #[arg(long, default_value = "data/fundamentals.csv")]
        input: PathBuf,
        #[arg(long)]
        ticker: String,
    },
    /// Target weights for a set of holdings
    Allocate {
        /// Holdings CSV (ticker,margin_of_safety)
        #[arg(long, default_value = "data/holdings.csv")]
        input: PathBuf,
        /// equal, value-weighted or conviction
        #[arg(long, default_value = "equal")]
        strategy: AllocationStrategy,
    },
    /// Trailing CAGR for benchmark price histories
    Benchmarks {
        #[arg(long, default_value = "data/benchmarks.csv")]
        input: PathBuf,
    },
    /// Value held positions at current prices
    Portfolio {
        /// Purchase lots CSV (ticker,shares,purchase_price)
        #[arg(long, default_value = "data/positions.csv")]
        positions: PathBuf,
        #[arg(long, default_value = "data/prices.csv")]
        prices: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Value {
            input,
            prices,
            ticker,
            growth,
            wacc,
        } => {
            let overrides = AssumptionOverrides {
                growth_rate: growth,
                wacc,
            };
            run_value(&input, &prices, ticker.as_deref(), &overrides, cli.json)
        }
        Command::Sensitivity { input, ticker } => run_sensitivity(&input, &ticker, cli.json),
        Command::Allocate { input, strategy } => run_allocate(&input, strategy, cli.json),
        Command::Benchmarks { input } => run_benchmarks(&input, cli.json),
        Command::Portfolio { positions, prices } => run_portfolio(&positions, &prices, cli.json),
    }
}

fn load_companies(input: &Path) -> Result<Vec<CompanyFundamentals>> {
    load_fundamentals(input)
        .with_context(|| format!("loading fundamentals from {}", input.display()))
}

fn load_quotes(prices: &Path) -> Result<HashMap<String, Decimal>> {
    load_prices(prices).with_context(|| format!("loading prices from {}", prices.display()))
}

fn run_value(
    input: &Path,
    prices: &Path,
    ticker: Option<&str>,
    overrides: &AssumptionOverrides,
    json: bool,
) -> Result<()> {
    let companies = load_companies(input)?;
    let quotes = load_quotes(prices)?;
    let defaults = ValuationDefaults::default();
    let wanted = ticker.map(|t| t.trim().to_uppercase());

    let reports: Vec<_> = companies
        .iter()
        .filter(|c| wanted.as_ref().map_or(true, |t| &c.ticker == t))
        .map(|c| {
            let price = quotes.get(&c.ticker).copied().unwrap_or_default();
            value_company(c, price, &defaults, overrides)
        })
        .collect();

    if reports.is_empty() {
        bail!("no companies matched in {}", input.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>14} {:>10} {:>9} {:>8} {:>8}  {}",
        "Ticker", "Intrinsic", "Price", "MOS%", "FCF%", "D/E%", "Status"
    );
    println!("{}", "-".repeat(86));

    for report in &reports {
        let price = if report.price_available {
            format!("{:.2}", report.current_price)
        } else {
            "n/a".to_string()
        };
        println!(
            "{:<8} {:>14.2} {:>10} {:>9.2} {:>8.2} {:>8.2}  {}",
            report.ticker,
            report.dcf.intrinsic_value,
            price,
            report.margin_of_safety,
            report.dcf.fcf_margin,
            report.dcf.debt_to_equity,
            report.status,
        );
    }

    Ok(())
}

fn run_sensitivity(input: &Path, ticker: &str, json: bool) -> Result<()> {
    let companies = load_companies(input)?;
    let wanted = ticker.trim().to_uppercase();
    let company = companies
        .iter()
        .find(|c| c.ticker == wanted)
        .with_context(|| format!("no fundamentals for {}", wanted))?;

    let grid = sensitivity_for(company, &ValuationDefaults::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    println!("Sensitivity for {} (rows: WACC %, columns: growth %)", company.ticker);
    print!("{:>8}", "");
    for growth in &grid.growth_steps {
        print!(" {:>12}", growth);
    }
    println!();

    for row in &grid.matrix {
        if let Some(first) = row.first() {
            print!("{:>8}", first.wacc);
        }
        for cell in row {
            print!(" {:>12.2}", cell.value);
        }
        println!();
    }

    Ok(())
}

fn run_allocate(input: &Path, strategy: AllocationStrategy, json: bool) -> Result<()> {
    let holdings = load_holdings(input)
        .with_context(|| format!("loading holdings from {}", input.display()))?;

    if holdings.is_empty() {
        bail!("{} contains no holdings", input.display());
    }

    let weights = calculate_allocation_weights(&holdings, strategy);

    if json {
        println!("{}", serde_json::to_string_pretty(&weights)?);
        return Ok(());
    }

    println!("Allocation ({}):", strategy);
    if weights.is_empty() {
        println!("  no holding has a positive margin of safety");
        return Ok(());
    }
    for (ticker, weight) in &weights {
        println!("  {:<8} {:>7.2}%", ticker, weight);
    }
    println!("  {:<8} {:>7.2}%", "Total", weights.values().sum::<f64>());

    Ok(())
}

fn run_benchmarks(input: &Path, json: bool) -> Result<()> {
    let reports: Vec<BenchmarkReport> = load_benchmarks(input)
        .with_context(|| format!("loading benchmarks from {}", input.display()))?
        .into_iter()
        .map(BenchmarkReport::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let fmt_rate = |rate: Option<f64>| rate.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}%", r));

    println!(
        "{:<8} {:<16} {:>12} {:>10} {:>10} {:>10} {:>10}",
        "Ticker", "Name", "Current", "1M", "1Y", "3Y", "5Y"
    );
    for report in &reports {
        println!(
            "{:<8} {:<16} {:>12.2} {:>10} {:>10} {:>10} {:>10}",
            report.history.ticker,
            report.history.name,
            report.history.current,
            fmt_rate(report.returns.cagr_1m),
            fmt_rate(report.returns.cagr_1y),
            fmt_rate(report.returns.cagr_3y),
            fmt_rate(report.returns.cagr_5y),
        );
    }

    Ok(())
}

fn run_portfolio(positions: &Path, prices: &Path, json: bool) -> Result<()> {
    let positions = load_positions(positions)
        .with_context(|| format!("loading positions from {}", positions.display()))?;
    let quotes = load_quotes(prices)?;

    let summary = PortfolioSummary::build(&positions, &quotes);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>14} {:>9}",
        "Ticker", "Shares", "AvgCost", "Price", "MarketValue", "Gain%"
    );
    for holding in &summary.holdings {
        println!(
            "{:<8} {:>10} {:>10.2} {:>10.2} {:>14.2} {:>9.2}",
            holding.ticker,
            holding.shares,
            holding.average_cost_basis,
            holding.current_price,
            holding.market_value,
            holding.gain_percent,
        );
    }

    println!("\nSummary:");
    println!("  Total Value: ${:.2}", summary.total_value);
    println!("  Total Cost:  ${:.2}", summary.total_cost_basis);
    println!("  Total Gain:  ${:.2} ({:.2}%)", summary.total_gain, summary.total_gain_percent);

    Ok(())
}
