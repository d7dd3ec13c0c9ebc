//! Forward price of a currency pair.

/// Day-count basis used for forward points.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Forward price from spot and the two money-market rates.
///
/// `spot + spot * (days / 365) * (domestic_rate - foreign_rate)`
#[must_use]
pub fn forward_price(spot: f64, domestic_rate: f64, foreign_rate: f64, days: u32) -> f64 {
    let swap_points = spot * f64::from(days) / DAYS_PER_YEAR * (domestic_rate - foreign_rate);
    spot + swap_points
}
