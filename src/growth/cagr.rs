//! Compound annual growth rate

/// Results at or above this many percent are treated as bad data
pub const CAGR_CEILING: f64 = 100_000.0;

/// Compound annual growth rate in percent
///
/// Returns `None` when either value or the period is non-positive, and when
/// the rate is non-finite or at least [`CAGR_CEILING`] (tiny bases such as
/// $0.01 -> $1000 say more about the data than about growth).
pub fn calculate_cagr(begin_value: f64, end_value: f64, years: f64) -> Option<f64> {
    if begin_value <= 0.0 || end_value <= 0.0 || years <= 0.0 {
        return None;
    }

    let rate = ((end_value / begin_value).powf(1.0 / years) - 1.0) * 100.0;

    if rate.is_finite() && rate < CAGR_CEILING {
        Some(rate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_year() {
        let cagr = calculate_cagr(100.0, 121.0, 1.0).unwrap();
        assert_abs_diff_eq!(cagr, 21.0, epsilon = 0.5);
    }

    #[test]
    fn test_multi_year() {
        let cagr = calculate_cagr(100.0, 146.41, 2.0).unwrap();
        assert_abs_diff_eq!(cagr, 21.0, epsilon = 0.5);
    }

    #[test]
    fn test_decline_is_negative() {
        let cagr = calculate_cagr(200.0, 100.0, 1.0).unwrap();
        assert_abs_diff_eq!(cagr, -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calculate_cagr(0.0, 100.0, 1.0).is_none());
        assert!(calculate_cagr(100.0, 0.0, 1.0).is_none());
        assert!(calculate_cagr(100.0, 100.0, 0.0).is_none());
        assert!(calculate_cagr(-100.0, 100.0, 1.0).is_none());
        assert!(calculate_cagr(100.0, 100.0, -2.0).is_none());
    }

    #[test]
    fn test_extreme_growth_is_rejected() {
        assert!(calculate_cagr(100.0, 10_000_000.0, 1.0).is_none());
        assert!(calculate_cagr(0.01, 1000.0, 1.0 / 12.0).is_none());
    }
}
