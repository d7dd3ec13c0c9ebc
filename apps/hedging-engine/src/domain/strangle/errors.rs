//! Strangle Errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::pricing::{OptionType, PricingError, Rates};
use crate::domain::position::PositionError;
use crate::domain::shared::Symbol;

/// Errors raised when building or operating a strangle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrangleError {
    /// The legs expire at different times.
    #[error("Strangle legs must share a maturity: call {call} vs put {put}")]
    MaturityMismatch {
        /// Call maturity in years.
        call: f64,
        /// Put maturity in years.
        put: f64,
    },

    /// Call strike is below put strike.
    #[error("Call strike {call} must be at or above put strike {put}")]
    StrikeOrdering {
        /// Call strike.
        call: f64,
        /// Put strike.
        put: f64,
    },

    /// A leg is not of the expected option type.
    #[error("Leg type mismatch: expected {expected} for {leg}, got {actual}")]
    LegTypeMismatch {
        /// Which leg (`leg1` or `leg2`).
        leg: &'static str,
        /// Type required for that leg.
        expected: OptionType,
        /// Type supplied.
        actual: OptionType,
    },

    /// The legs are written on different underlyings.
    #[error("Strangle legs must share an underlying: call {call} vs put {put}")]
    UnderlyingMismatch {
        /// Call underlying.
        call: Symbol,
        /// Put underlying.
        put: Symbol,
    },

    /// The legs are priced with different rates.
    #[error("Strangle legs must share rates: call {call:?} vs put {put:?}")]
    RatesMismatch {
        /// Call rates.
        call: Rates,
        /// Put rates.
        put: Rates,
    },

    /// Strangle size is zero or negative.
    #[error("Strangle size must be strictly positive, got {size}")]
    NonPositiveQuantity {
        /// Size supplied.
        size: Decimal,
    },

    /// Recap history can only be restored into an empty log.
    #[error("Recap log already holds {len} snapshots")]
    RecapNotEmpty {
        /// Snapshots already present.
        len: usize,
    },

    /// Pricing failed while aggregating or repricing.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<PositionError> for StrangleError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::NonPositiveQuantity { quantity } => {
                Self::NonPositiveQuantity { size: quantity }
            }
        }
    }
}
