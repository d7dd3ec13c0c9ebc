//! Spot Asset Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Valuation;
use crate::domain::pricing::PricingError;
use crate::domain::shared::Symbol;

/// Kind of spot instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotClass {
    /// Currency pair (hedges FX options).
    Currency,
    /// Equity share (hedges vanilla options).
    Equity,
}

impl fmt::Display for SpotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Currency => write!(f, "currency"),
            Self::Equity => write!(f, "equity"),
        }
    }
}

/// A spot instrument bought or sold at a fixed entry price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotAsset {
    class: SpotClass,
    ticker: Symbol,
    price: f64,
}

impl SpotAsset {
    /// Create a spot asset at its entry price.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NumericDomain` if the price is not strictly positive.
    pub fn new(class: SpotClass, ticker: Symbol, price: f64) -> Result<Self, PricingError> {
        PricingError::require_positive("price", price)?;
        Ok(Self {
            class,
            ticker,
            price,
        })
    }

    /// Get the class.
    #[must_use]
    pub const fn class(&self) -> SpotClass {
        self.class
    }

    /// Get the ticker.
    #[must_use]
    pub const fn ticker(&self) -> &Symbol {
        &self.ticker
    }

    /// Get the entry price.
    #[must_use]
    pub const fn entry_price(&self) -> f64 {
        self.price
    }
}

impl Valuation for SpotAsset {
    fn payoff(&self, spot_at_expiry: f64) -> f64 {
        spot_at_expiry - self.price
    }

    fn price(&self) -> Result<f64, PricingError> {
        Ok(self.price)
    }

    fn delta(&self) -> Result<f64, PricingError> {
        Ok(1.0)
    }

    fn gamma(&self) -> Result<f64, PricingError> {
        Ok(0.0)
    }

    // Payoff already nets the entry price
    fn premium(&self) -> Result<f64, PricingError> {
        Ok(0.0)
    }
}
