//! Option Contract Value Object

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Valuation;
use crate::domain::pricing::{
    BlackScholesInputs, OptionState, OptionType, PricingError, Rates, moneyness, payoff,
};
use crate::domain::shared::Symbol;

/// Immutable identity of an option, independent of the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionTerms {
    /// Ticker of the underlying.
    pub underlying: Symbol,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Annualized volatility.
    pub volatility: f64,
}

impl OptionTerms {
    /// Terms of a call option.
    #[must_use]
    pub fn call(underlying: impl Into<Symbol>, strike: f64, maturity: f64, volatility: f64) -> Self {
        Self {
            underlying: underlying.into(),
            option_type: OptionType::Call,
            strike,
            maturity,
            volatility,
        }
    }

    /// Terms of a put option.
    #[must_use]
    pub fn put(underlying: impl Into<Symbol>, strike: f64, maturity: f64, volatility: f64) -> Self {
        Self {
            underlying: underlying.into(),
            option_type: OptionType::Put,
            strike,
            maturity,
            volatility,
        }
    }
}

/// An option priced at a given spot.
///
/// Vanilla when the rates are [`Rates::Flat`], FX when they are
/// [`Rates::Fx`]. A new spot yields a new contract via [`Self::reprice`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionContract {
    terms: OptionTerms,
    rates: Rates,
    spot: f64,
}

impl OptionContract {
    /// Create a contract and check it can be priced.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NumericDomain` if spot, strike, maturity or
    /// volatility is not strictly positive, or a rate is not finite.
    pub fn new(terms: OptionTerms, rates: Rates, spot: f64) -> Result<Self, PricingError> {
        let contract = Self { terms, rates, spot };
        contract.inputs().validate()?;
        Ok(contract)
    }

    /// Same contract priced at a new spot.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NumericDomain` if `spot` is not strictly positive.
    pub fn reprice(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(self.terms.clone(), self.rates, spot)
    }

    /// Model inputs for the current snapshot.
    #[must_use]
    pub fn inputs(&self) -> BlackScholesInputs {
        BlackScholesInputs {
            spot: self.spot,
            strike: self.terms.strike,
            maturity: self.terms.maturity,
            volatility: self.terms.volatility,
            rates: self.rates,
            option_type: self.terms.option_type,
        }
    }

    /// Moneyness at the current spot.
    pub fn state(&self) -> Result<OptionState, PricingError> {
        moneyness(self.terms.option_type, self.terms.strike, self.spot)
    }

    /// Moneyness at an arbitrary spot.
    pub fn state_at(&self, spot: f64) -> Result<OptionState, PricingError> {
        moneyness(self.terms.option_type, self.terms.strike, spot)
    }

    /// Get the terms.
    #[must_use]
    pub const fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Get the rates.
    #[must_use]
    pub const fn rates(&self) -> Rates {
        self.rates
    }

    /// Get the spot this contract is priced at.
    #[must_use]
    pub const fn spot(&self) -> f64 {
        self.spot
    }

    /// Get the strike.
    #[must_use]
    pub const fn strike(&self) -> f64 {
        self.terms.strike
    }

    /// Get the maturity in years.
    #[must_use]
    pub const fn maturity(&self) -> f64 {
        self.terms.maturity
    }

    /// Get the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.terms.option_type
    }

    /// Get the underlying ticker.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.terms.underlying
    }

    /// Check if this is an FX option.
    #[must_use]
    pub const fn is_fx(&self) -> bool {
        self.rates.is_fx()
    }
}

impl Valuation for OptionContract {
    fn payoff(&self, spot_at_expiry: f64) -> f64 {
        payoff(self.terms.option_type, self.terms.strike, spot_at_expiry)
    }

    fn price(&self) -> Result<f64, PricingError> {
        self.inputs().price()
    }

    fn delta(&self) -> Result<f64, PricingError> {
        self.inputs().delta()
    }

    fn gamma(&self) -> Result<f64, PricingError> {
        self.inputs().gamma()
    }
}

impl fmt::Display for OptionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let months = (self.terms.maturity * 12.0).trunc() as i64;
        let strike = Decimal::from_f64(self.terms.strike).map_or_else(
            || format!("{:.4}", self.terms.strike),
            |k| k.round_dp(4).normalize().to_string(),
        );
        write!(
            f,
            "{} maturity {months} months, strike {strike}",
            self.terms.option_type
        )
    }
}
