//! Black-Scholes model for vanilla and FX options.
//!
//! Vanilla options drift at the risk-free rate. FX options (Garman-Kohlhagen)
//! drift at `r_d - r_f` and discount the spot leg at the foreign rate.
//!
//! Delta and gamma follow the conventions of the desk model this engine
//! replaces: vanilla PUT delta is `N(-d1)` (not negated) and gamma is
//! evaluated with its own per-branch expressions. See DESIGN.md before
//! changing either.

// Black-Scholes uses standard mathematical notation (s, k, t, r, sigma)
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{OptionState, OptionType, PricingError};

/// Standard normal CDF (cumulative distribution function).
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Interest-rate inputs of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rates {
    /// Single risk-free rate (vanilla options).
    Flat {
        /// Risk-free rate (annualized, continuous).
        rate: f64,
    },
    /// Domestic/foreign rate pair (FX options).
    Fx {
        /// Domestic rate, used for drift and strike discounting.
        domestic: f64,
        /// Foreign rate, used to discount the spot leg.
        foreign: f64,
    },
}

impl Rates {
    /// Drift of the underlying under the pricing measure.
    #[must_use]
    pub fn drift(&self) -> f64 {
        match *self {
            Self::Flat { rate } => rate,
            Self::Fx { domestic, foreign } => domestic - foreign,
        }
    }

    /// Rate used to discount the strike.
    #[must_use]
    pub const fn discount_rate(&self) -> f64 {
        match *self {
            Self::Flat { rate } => rate,
            Self::Fx { domestic, .. } => domestic,
        }
    }

    /// Check if these are FX (two-currency) rates.
    #[must_use]
    pub const fn is_fx(&self) -> bool {
        matches!(self, Self::Fx { .. })
    }

    fn validate(&self) -> Result<(), PricingError> {
        match *self {
            Self::Flat { rate } => {
                PricingError::require_finite("rate", rate)?;
            }
            Self::Fx { domestic, foreign } => {
                PricingError::require_finite("domestic_rate", domestic)?;
                PricingError::require_finite("foreign_rate", foreign)?;
            }
        }
        Ok(())
    }
}

/// Full set of inputs for one Black-Scholes evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackScholesInputs {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Rate model (vanilla or FX).
    pub rates: Rates,
    /// Call or put.
    pub option_type: OptionType,
}

impl BlackScholesInputs {
    /// Check the model preconditions: S, K, T, sigma finite and > 0, rates finite.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NumericDomain` naming the first offending input.
    pub fn validate(&self) -> Result<(), PricingError> {
        PricingError::require_positive("spot", self.spot)?;
        PricingError::require_positive("strike", self.strike)?;
        PricingError::require_positive("maturity", self.maturity)?;
        PricingError::require_positive("volatility", self.volatility)?;
        self.rates.validate()
    }

    /// `d1 = (ln(S/K) + (drift + sigma^2/2) T) / (sigma sqrt(T))`
    pub fn d1(&self) -> Result<f64, PricingError> {
        self.validate()?;
        Ok(self.d1_unchecked())
    }

    /// `d2 = d1 - sigma sqrt(T)`
    pub fn d2(&self) -> Result<f64, PricingError> {
        Ok(self.d1()? - self.volatility * self.maturity.sqrt())
    }

    fn d1_unchecked(&self) -> f64 {
        let s = self.spot;
        let k = self.strike;
        let t = self.maturity;
        let sigma = self.volatility;
        ((s / k).ln() + (self.rates.drift() + sigma * sigma / 2.0) * t) / (sigma * t.sqrt())
    }

    /// Discount factor applied to the spot leg (`e^(-r_f T)`, 1 for vanilla).
    fn spot_discount(&self) -> f64 {
        match self.rates {
            Rates::Flat { .. } => 1.0,
            Rates::Fx { foreign, .. } => (-foreign * self.maturity).exp(),
        }
    }

    /// Theoretical option price.
    pub fn price(&self) -> Result<f64, PricingError> {
        let d1 = self.d1()?;
        let d2 = d1 - self.volatility * self.maturity.sqrt();
        let s = self.spot * self.spot_discount();
        let k = self.strike * (-self.rates.discount_rate() * self.maturity).exp();

        let price = match self.option_type {
            OptionType::Call => s * norm_cdf(d1) - k * norm_cdf(d2),
            OptionType::Put => -s * norm_cdf(-d1) + k * norm_cdf(-d2),
        };
        trace!(d1, d2, price, option_type = %self.option_type, "black-scholes price");
        Ok(price)
    }

    /// Delta of one unit of the option.
    pub fn delta(&self) -> Result<f64, PricingError> {
        let d1 = self.d1()?;
        let delta = match (self.rates, self.option_type) {
            (Rates::Flat { .. }, OptionType::Call) => norm_cdf(d1),
            (Rates::Flat { .. }, OptionType::Put) => norm_cdf(-d1),
            (Rates::Fx { .. }, OptionType::Call) => self.spot_discount() * norm_cdf(d1),
            (Rates::Fx { .. }, OptionType::Put) => -self.spot_discount() * norm_cdf(-d1),
        };
        Ok(delta)
    }

    /// Gamma of one unit of the option, per-branch as the desk model defines it.
    pub fn gamma(&self) -> Result<f64, PricingError> {
        let d1 = self.d1()?;
        let s = self.spot;
        let t = self.maturity;
        let sigma = self.volatility;

        let gamma = match (self.rates, self.option_type) {
            (Rates::Flat { .. }, OptionType::Call) => norm_cdf(d1) / s * sigma * t.sqrt(),
            (Rates::Flat { rate }, OptionType::Put) => {
                let d2 = d1 - sigma * t.sqrt();
                self.strike * (-rate * t).exp() * norm_cdf(d2) / (s * s) * sigma * t.sqrt()
            }
            (Rates::Fx { .. }, _) => self.spot_discount() * norm_cdf(d1) / s * sigma * t.sqrt(),
        };
        Ok(gamma)
    }

    /// Classify `spot` against this option's strike.
    pub fn moneyness(&self, spot: f64) -> Result<OptionState, PricingError> {
        moneyness(self.option_type, self.strike, spot)
    }
}

/// Classify a spot price against a strike (exact comparison, no tolerance).
pub fn moneyness(
    option_type: OptionType,
    strike: f64,
    spot: f64,
) -> Result<OptionState, PricingError> {
    if spot == strike {
        return Ok(OptionState::Atm);
    }
    match option_type {
        OptionType::Call if spot > strike => Ok(OptionState::Itm),
        OptionType::Call if spot < strike => Ok(OptionState::Otm),
        OptionType::Put if spot > strike => Ok(OptionState::Otm),
        OptionType::Put if spot < strike => Ok(OptionState::Itm),
        OptionType::Call | OptionType::Put => {
            Err(PricingError::MoneynessUndefined { spot, strike })
        }
    }
}

/// Payoff at expiry of one unit of an option.
#[must_use]
pub fn payoff(option_type: OptionType, strike: f64, spot_at_expiry: f64) -> f64 {
    match option_type {
        OptionType::Call if spot_at_expiry > strike => spot_at_expiry - strike,
        OptionType::Put if spot_at_expiry < strike => strike - spot_at_expiry,
        OptionType::Call | OptionType::Put => 0.0,
    }
}
