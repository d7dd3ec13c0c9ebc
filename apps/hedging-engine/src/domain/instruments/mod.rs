//! Instruments Bounded Context
//!
//! Options and spot instruments a position can hold, behind the
//! [`Valuation`] capability.

mod asset;
mod option_contract;
mod spot_asset;

pub use asset::{Asset, AssetClass};
pub use option_contract::{OptionContract, OptionTerms};
pub use spot_asset::{SpotAsset, SpotClass};

use crate::domain::pricing::PricingError;

/// Valuation of one unit of an asset.
pub trait Valuation {
    /// Value at expiry for a given spot.
    fn payoff(&self, spot_at_expiry: f64) -> f64;

    /// Current theoretical value.
    fn price(&self) -> Result<f64, PricingError>;

    /// First-order sensitivity to spot.
    fn delta(&self) -> Result<f64, PricingError>;

    /// Second-order sensitivity to spot.
    fn gamma(&self) -> Result<f64, PricingError>;

    /// Amount paid to enter, netted against payoff in profit.
    fn premium(&self) -> Result<f64, PricingError> {
        self.price()
    }
}
