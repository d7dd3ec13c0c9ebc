//! Position Value Object

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::{PositionError, PositionSide};
use crate::domain::instruments::{Asset, Valuation};
use crate::domain::pricing::PricingError;

/// A directional holding of one asset.
///
/// Quantity is strictly positive; the side carries the sign. Payoff, profit,
/// delta and gamma are the asset's own values, negated when short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    side: PositionSide,
    asset: Asset,
    quantity: Decimal,
}

impl Position {
    /// Open a position.
    ///
    /// # Errors
    ///
    /// Returns `PositionError::NonPositiveQuantity` if `quantity <= 0`.
    pub fn new(
        side: PositionSide,
        asset: impl Into<Asset>,
        quantity: Decimal,
    ) -> Result<Self, PositionError> {
        if quantity <= Decimal::ZERO {
            return Err(PositionError::NonPositiveQuantity { quantity });
        }
        Ok(Self {
            side,
            asset: asset.into(),
            quantity,
        })
    }

    /// Get the asset.
    #[must_use]
    pub const fn asset(&self) -> &Asset {
        &self.asset
    }

    /// Get the side.
    #[must_use]
    pub const fn side(&self) -> PositionSide {
        self.side
    }

    /// Get the (unsigned) quantity.
    #[must_use]
    pub const fn size(&self) -> Decimal {
        self.quantity
    }

    /// Quantity with the side's sign applied.
    #[must_use]
    pub fn signed_quantity(&self) -> Decimal {
        self.quantity * self.side.decimal_sign()
    }

    /// Signed payoff at expiry.
    #[must_use]
    pub fn payoff(&self, spot_at_expiry: f64) -> f64 {
        self.side.sign() * self.asset.payoff(spot_at_expiry)
    }

    /// Signed payoff net of the premium.
    pub fn profit(&self, spot_at_expiry: f64) -> Result<f64, PricingError> {
        let premium = self.asset.premium()?;
        Ok(self.side.sign() * (self.asset.payoff(spot_at_expiry) - premium))
    }

    /// Signed delta of the asset.
    pub fn delta(&self) -> Result<f64, PricingError> {
        Ok(self.side.sign() * self.asset.delta()?)
    }

    /// Signed gamma of the asset.
    pub fn gamma(&self) -> Result<f64, PricingError> {
        Ok(self.side.sign() * self.asset.gamma()?)
    }

    /// Same position with its asset priced at a new spot.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NumericDomain` if `spot` cannot price the asset.
    pub fn reprice(&self, spot: f64) -> Result<Self, PricingError> {
        Ok(Self {
            side: self.side,
            asset: self.asset.reprice(spot)?,
            quantity: self.quantity,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} x{}", self.side, self.asset, self.quantity)
    }
}
