//! Asset variants

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OptionContract, SpotAsset, SpotClass, Valuation};
use crate::domain::pricing::PricingError;
use crate::domain::shared::Symbol;

/// Closed set of asset classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Vanilla (single-rate) option.
    VanillaOption,
    /// FX (two-rate) option.
    FxOption,
    /// Currency pair.
    Currency,
    /// Equity share.
    Equity,
}

/// Anything a [`Position`](crate::domain::position::Position) can hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "asset", rename_all = "snake_case")]
pub enum Asset {
    /// Option (vanilla or FX).
    Option(OptionContract),
    /// Spot instrument (currency or equity).
    Spot(SpotAsset),
}

impl Asset {
    /// Get the asset class.
    #[must_use]
    pub const fn class(&self) -> AssetClass {
        match self {
            Self::Option(option) if option.is_fx() => AssetClass::FxOption,
            Self::Option(_) => AssetClass::VanillaOption,
            Self::Spot(spot) => match spot.class() {
                SpotClass::Currency => AssetClass::Currency,
                SpotClass::Equity => AssetClass::Equity,
            },
        }
    }

    /// Ticker of the instrument (the underlying for options).
    #[must_use]
    pub const fn ticker(&self) -> &Symbol {
        match self {
            Self::Option(option) => option.underlying(),
            Self::Spot(spot) => spot.ticker(),
        }
    }

    /// Get the option contract, if this is an option.
    #[must_use]
    pub const fn as_option(&self) -> Option<&OptionContract> {
        match self {
            Self::Option(option) => Some(option),
            Self::Spot(_) => None,
        }
    }

    /// Same asset at a new spot. Spot assets keep their entry price.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NumericDomain` if `spot` cannot price the option.
    pub fn reprice(&self, spot: f64) -> Result<Self, PricingError> {
        match self {
            Self::Option(option) => option.reprice(spot).map(Self::Option),
            Self::Spot(_) => Ok(self.clone()),
        }
    }
}

impl Valuation for Asset {
    fn payoff(&self, spot_at_expiry: f64) -> f64 {
        match self {
            Self::Option(option) => option.payoff(spot_at_expiry),
            Self::Spot(spot) => spot.payoff(spot_at_expiry),
        }
    }

    fn price(&self) -> Result<f64, PricingError> {
        match self {
            Self::Option(option) => option.price(),
            Self::Spot(spot) => spot.price(),
        }
    }

    fn delta(&self) -> Result<f64, PricingError> {
        match self {
            Self::Option(option) => option.delta(),
            Self::Spot(spot) => spot.delta(),
        }
    }

    fn gamma(&self) -> Result<f64, PricingError> {
        match self {
            Self::Option(option) => option.gamma(),
            Self::Spot(spot) => spot.gamma(),
        }
    }

    fn premium(&self) -> Result<f64, PricingError> {
        match self {
            Self::Option(option) => option.premium(),
            Self::Spot(spot) => spot.premium(),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option(option) => write!(f, "{option}"),
            Self::Spot(spot) => write!(f, "{} {} @ {}", spot.class(), spot.ticker(), spot.entry_price()),
        }
    }
}

impl From<OptionContract> for Asset {
    fn from(option: OptionContract) -> Self {
        Self::Option(option)
    }
}

impl From<SpotAsset> for Asset {
    fn from(spot: SpotAsset) -> Self {
        Self::Spot(spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instruments::OptionTerms;
    use crate::domain::pricing::Rates;

    fn vanilla_call() -> OptionContract {
        OptionContract::new(
            OptionTerms::call("AAPL", 100.0, 1.0, 0.2),
            Rates::Flat { rate: 0.05 },
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn asset_class_dispatch() {
        assert_eq!(Asset::from(vanilla_call()).class(), AssetClass::VanillaOption);

        let fx = OptionContract::new(
            OptionTerms::put("EURUSD", 1.06, 0.25, 0.1),
            Rates::Fx {
                domestic: 0.0476,
                foreign: 0.0225,
            },
            1.07,
        )
        .unwrap();
        assert_eq!(Asset::from(fx).class(), AssetClass::FxOption);

        let eur = SpotAsset::new(SpotClass::Currency, Symbol::new("EURUSD=X"), 1.07).unwrap();
        assert_eq!(Asset::from(eur).class(), AssetClass::Currency);
    }

    #[test]
    fn reprice_leaves_spot_asset_unchanged() {
        let aapl = Asset::from(SpotAsset::new(SpotClass::Equity, Symbol::new("AAPL"), 100.0).unwrap());
        assert_eq!(aapl.reprice(120.0).unwrap(), aapl);
    }

    #[test]
    fn reprice_moves_option_spot() {
        let call = Asset::from(vanilla_call());
        let repriced = call.reprice(110.0).unwrap();
        assert_eq!(repriced.as_option().map(OptionContract::spot), Some(110.0));
        assert_eq!(repriced.ticker().as_str(), "AAPL");
    }

    #[test]
    fn option_premium_is_price() {
        let call = Asset::from(vanilla_call());
        assert_eq!(call.premium().unwrap(), call.price().unwrap());
    }
}
