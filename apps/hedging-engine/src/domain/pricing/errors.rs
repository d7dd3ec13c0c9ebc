//! Pricing Errors

use thiserror::Error;

/// Errors raised by the pricing model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// An input is outside the domain of the model (zero or negative
    /// volatility/maturity, non-positive spot/strike, non-finite value).
    #[error("Numeric domain error: {field} = {value} ({reason})")]
    NumericDomain {
        /// Offending input.
        field: &'static str,
        /// Value supplied.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Spot/strike comparison fell outside the ATM/ITM/OTM branches.
    #[error("Moneyness undefined for spot {spot} against strike {strike}")]
    MoneynessUndefined {
        /// Spot that was classified.
        spot: f64,
        /// Option strike.
        strike: f64,
    },
}

impl PricingError {
    /// Reject anything that is not a finite, strictly positive number.
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NumericDomain {
                field,
                value,
                reason: "must be finite",
            });
        }
        if value <= 0.0 {
            return Err(Self::NumericDomain {
                field,
                value,
                reason: "must be strictly positive",
            });
        }
        Ok(value)
    }

    /// Reject non-finite numbers (rates may be zero or negative).
    pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NumericDomain {
                field,
                value,
                reason: "must be finite",
            })
        }
    }
}
