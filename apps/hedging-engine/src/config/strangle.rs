//! Strangle definition: underlying, legs and size.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::position::PositionSide;

/// Option style of both legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStyle {
    /// Single risk-free rate; hedged with the equity.
    Vanilla,
    /// Domestic/foreign rates; hedged with the quoted currency pair.
    Fx,
}

/// Strangle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrangleConfig {
    /// Underlying ticker (e.g. "EURUSD", "AAPL").
    pub underlying: String,
    /// Option style.
    #[serde(default = "default_style")]
    pub style: OptionStyle,
    /// Side of both legs.
    #[serde(default = "default_side")]
    pub side: PositionSide,
    /// Quantity of each leg.
    pub size: Decimal,
    /// Call strike (defaults to the ATM forward).
    #[serde(default)]
    pub call_strike: Option<f64>,
    /// Put strike (defaults to the ATM forward).
    #[serde(default)]
    pub put_strike: Option<f64>,
    /// Time to maturity in years.
    #[serde(default = "default_maturity_years")]
    pub maturity_years: f64,
    /// Days used to compute the ATM-forward strike.
    #[serde(default = "default_forward_days")]
    pub forward_days: u32,
}

const fn default_style() -> OptionStyle {
    OptionStyle::Fx
}

const fn default_side() -> PositionSide {
    PositionSide::Short
}

const fn default_maturity_years() -> f64 {
    0.25
}

const fn default_forward_days() -> u32 {
    90
}
