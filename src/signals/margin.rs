//! Margin of safety

/// Percentage by which intrinsic value exceeds the current price
///
/// Positive means undervalued, negative overvalued. A non-positive
/// intrinsic value gives 0 since there is nothing to measure against.
pub fn calculate_margin_of_safety(intrinsic_value: f64, current_price: f64) -> f64 {
    if intrinsic_value <= 0.0 {
        return 0.0;
    }
    (intrinsic_value - current_price) / intrinsic_value * 100.0
}
