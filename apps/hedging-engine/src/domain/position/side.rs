//! Position side

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position side (long or short).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
}

impl PositionSide {
    /// Get the sign multiplier for this side.
    #[must_use]
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }

    /// Sign multiplier for decimal quantities.
    #[must_use]
    pub const fn decimal_sign(&self) -> Decimal {
        match self {
            Self::Long => Decimal::ONE,
            Self::Short => Decimal::NEGATIVE_ONE,
        }
    }

    /// The side that offsets this one.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }

    /// Side that offsets a signed exposure: short a positive delta, long a negative one.
    #[must_use]
    pub fn offsetting(exposure: Decimal) -> Self {
        if exposure.is_sign_negative() {
            Self::Long
        } else {
            Self::Short
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "Long"),
            Self::Short => write!(f, "Short"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn side_signs() {
        assert_eq!(PositionSide::Long.sign(), 1.0);
        assert_eq!(PositionSide::Short.sign(), -1.0);
        assert_eq!(PositionSide::Short.decimal_sign(), dec!(-1));
    }

    #[test]
    fn side_opposite() {
        assert_eq!(PositionSide::Long.opposite(), PositionSide::Short);
        assert_eq!(PositionSide::Short.opposite(), PositionSide::Long);
    }

    #[test]
    fn offsetting_side() {
        assert_eq!(PositionSide::offsetting(dec!(0.12)), PositionSide::Short);
        assert_eq!(PositionSide::offsetting(dec!(-0.12)), PositionSide::Long);
    }

    #[test]
    fn side_serde() {
        assert_eq!(serde_json::to_string(&PositionSide::Short).unwrap(), "\"short\"");
    }
}
