//! Rounding and neutrality rules for aggregate greeks.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::PricingError;

/// Default decimal places for aggregate delta and gamma.
pub const DEFAULT_DELTA_PRECISION: u32 = 2;

/// How aggregate greeks are rounded, and when delta counts as flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaPolicy {
    /// Decimal places kept.
    pub precision: u32,
    /// Deltas smaller than this in magnitude are reported as zero.
    pub neutral_band: Decimal,
}

impl Default for DeltaPolicy {
    fn default() -> Self {
        Self {
            precision: DEFAULT_DELTA_PRECISION,
            neutral_band: Decimal::new(1, 2),
        }
    }
}

impl DeltaPolicy {
    /// Round a raw delta, snapping anything inside the neutral band to zero.
    ///
    /// The band is checked on the raw value as well as the rounded one so
    /// that a residual such as 0.005 is flat regardless of float noise.
    #[must_use]
    pub fn snap(&self, raw: Decimal) -> Decimal {
        if raw.abs() < self.neutral_band {
            return Decimal::ZERO;
        }
        let rounded = raw.round_dp(self.precision);
        if rounded.abs() < self.neutral_band {
            Decimal::ZERO
        } else {
            rounded
        }
    }

    /// Round without snapping (used for gamma).
    #[must_use]
    pub fn round(&self, raw: Decimal) -> Decimal {
        raw.round_dp(self.precision)
    }
}

/// Convert a model output to a decimal, rejecting NaN and infinities.
pub(crate) fn to_decimal(field: &'static str, value: f64) -> Result<Decimal, PricingError> {
    Decimal::from_f64(value).ok_or(PricingError::NumericDomain {
        field,
        value,
        reason: "not representable as a decimal",
    })
}
