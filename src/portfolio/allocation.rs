//! Portfolio allocation weights
//!
//! Three strategies, none of which fall back to another:
//! - equal: `100 / n` each
//! - value-weighted: proportional to positive margin of safety, empty when
//!   no holding has one
//! - conviction: fixed 15% for the five best margins, 5% for the rest,
//!   never normalised to 100%

use crate::error::VultureError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of top-ranked holdings that get the conviction weight
pub const CONVICTION_TOP_N: usize = 5;

/// Weight (%) for each top-ranked holding under the conviction strategy
pub const CONVICTION_TOP_WEIGHT: f64 = 15.0;

/// Weight (%) for every other holding under the conviction strategy
pub const CONVICTION_REST_WEIGHT: f64 = 5.0;

/// A candidate position and its margin of safety (%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub margin_of_safety: f64,
}

impl Holding {
    pub fn new(ticker: impl Into<String>, margin_of_safety: f64) -> Self {
        Self {
            ticker: ticker.into(),
            margin_of_safety,
        }
    }
}

/// How target weights are assigned across holdings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStrategy {
    Equal,
    ValueWeighted,
    Conviction,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::Equal => "equal",
            AllocationStrategy::ValueWeighted => "value-weighted",
            AllocationStrategy::Conviction => "conviction",
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationStrategy {
    type Err = VultureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(AllocationStrategy::Equal),
            "value-weighted" => Ok(AllocationStrategy::ValueWeighted),
            "conviction" => Ok(AllocationStrategy::Conviction),
            other => Err(VultureError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Target weight (%) per ticker
///
/// Tickers are expected to be unique; a repeated ticker keeps the weight of
/// its last occurrence. Callers must not pass an empty slice for the equal
/// strategy expecting a meaningful result: it simply yields an empty map.
pub fn calculate_allocation_weights(
    holdings: &[Holding],
    strategy: AllocationStrategy,
) -> BTreeMap<String, f64> {
    let mut weights = BTreeMap::new();

    match strategy {
        AllocationStrategy::Equal => {
            let weight = 100.0 / holdings.len() as f64;
            for holding in holdings {
                weights.insert(holding.ticker.clone(), weight);
            }
        }
        AllocationStrategy::ValueWeighted => {
            let total_mos: f64 = holdings
                .iter()
                .map(|h| h.margin_of_safety.max(0.0))
                .sum();

            if total_mos > 0.0 {
                for holding in holdings {
                    let weight = holding.margin_of_safety.max(0.0) / total_mos * 100.0;
                    weights.insert(holding.ticker.clone(), weight);
                }
            } else {
                log::debug!(
                    "no holding has a positive margin of safety; value-weighted allocation is empty"
                );
            }
        }
        AllocationStrategy::Conviction => {
            let mut ranked: Vec<&Holding> = holdings.iter().collect();
            // Stable: ties keep their input order
            ranked.sort_by(|a, b| b.margin_of_safety.total_cmp(&a.margin_of_safety));

            for (rank, holding) in ranked.into_iter().enumerate() {
                let weight = if rank < CONVICTION_TOP_N {
                    CONVICTION_TOP_WEIGHT
                } else {
                    CONVICTION_REST_WEIGHT
                };
                weights.insert(holding.ticker.clone(), weight);
            }
        }
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equal_weights() {
        let holdings = vec![
            Holding::new("AAPL", 15.0),
            Holding::new("MSFT", 20.0),
            Holding::new("GOOGL", 10.0),
        ];
        let weights = calculate_allocation_weights(&holdings, AllocationStrategy::Equal);

        assert_eq!(weights.len(), 3);
        for weight in weights.values() {
            assert_abs_diff_eq!(*weight, 33.333, epsilon = 0.01);
        }
        assert_abs_diff_eq!(weights.values().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_weights_empty() {
        assert!(calculate_allocation_weights(&[], AllocationStrategy::Equal).is_empty());
    }

    #[test]
    fn test_value_weighted() {
        let holdings = vec![Holding::new("AAPL", 20.0), Holding::new("MSFT", 10.0)];
        let weights = calculate_allocation_weights(&holdings, AllocationStrategy::ValueWeighted);

        assert_abs_diff_eq!(weights["AAPL"], 66.67, epsilon = 0.01);
        assert_abs_diff_eq!(weights["MSFT"], 33.33, epsilon = 0.01);
    }

    #[test]
    fn test_value_weighted_ignores_negative_margins() {
        let holdings = vec![
            Holding::new("AAPL", 30.0),
            Holding::new("TSLA", -40.0),
            Holding::new("MSFT", 10.0),
        ];
        let weights = calculate_allocation_weights(&holdings, AllocationStrategy::ValueWeighted);

        assert_abs_diff_eq!(weights["AAPL"], 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(weights["MSFT"], 25.0, epsilon = 1e-9);
        assert_eq!(weights["TSLA"], 0.0);
    }

    #[test]
    fn test_value_weighted_all_overvalued_is_empty() {
        let holdings = vec![Holding::new("AAPL", -5.0), Holding::new("MSFT", 0.0)];
        let weights = calculate_allocation_weights(&holdings, AllocationStrategy::ValueWeighted);

        assert!(weights.is_empty());
    }

    #[test]
    fn test_conviction_is_not_normalised() {
        let holdings = vec![
            Holding::new("F", 5.0),
            Holding::new("C", 30.0),
            Holding::new("A", 50.0),
            Holding::new("E", 10.0),
            Holding::new("B", 40.0),
            Holding::new("D", 20.0),
        ];
        let weights = calculate_allocation_weights(&holdings, AllocationStrategy::Conviction);

        for ticker in ["A", "B", "C", "D", "E"] {
            assert_eq!(weights[ticker], 15.0);
        }
        assert_eq!(weights["F"], 5.0);
        assert_eq!(weights.values().sum::<f64>(), 80.0);
    }

    #[test]
    fn test_conviction_ties_keep_input_order() {
        let holdings: Vec<Holding> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|t| Holding::new(*t, 10.0))
            .collect();
        let weights = calculate_allocation_weights(&holdings, AllocationStrategy::Conviction);

        assert_eq!(weights["E"], 15.0);
        assert_eq!(weights["F"], 5.0);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("value-weighted".parse::<AllocationStrategy>().unwrap(), AllocationStrategy::ValueWeighted);
        assert_eq!(" Conviction ".parse::<AllocationStrategy>().unwrap(), AllocationStrategy::Conviction);
        assert!(matches!(
            "kelly".parse::<AllocationStrategy>(),
            Err(VultureError::UnknownStrategy(_))
        ));
        assert_eq!(AllocationStrategy::Equal.to_string(), "equal");
    }
}
