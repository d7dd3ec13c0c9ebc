//! Option type and moneyness state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl OptionType {
    /// Check if this is a call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self, Self::Call)
    }

    /// Check if this is a put.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self, Self::Put)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Moneyness of an option relative to a spot price.
///
/// Always derived from the current spot, never stored on the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionState {
    /// At the money (spot equals strike exactly).
    Atm,
    /// In the money.
    Itm,
    /// Out of the money.
    Otm,
}

impl fmt::Display for OptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atm => write!(f, "ATM"),
            Self::Itm => write!(f, "ITM"),
            Self::Otm => write!(f, "OTM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_display() {
        assert_eq!(OptionType::Call.to_string(), "CALL");
        assert_eq!(OptionType::Put.to_string(), "PUT");
    }

    #[test]
    fn option_type_predicates() {
        assert!(OptionType::Call.is_call());
        assert!(!OptionType::Call.is_put());
        assert!(OptionType::Put.is_put());
    }

    #[test]
    fn option_type_serde() {
        let json = serde_json::to_string(&OptionType::Put).unwrap();
        assert_eq!(json, "\"PUT\"");

        let parsed: OptionType = serde_json::from_str("\"CALL\"").unwrap();
        assert_eq!(parsed, OptionType::Call);
    }

    #[test]
    fn option_state_display_and_serde() {
        assert_eq!(OptionState::Itm.to_string(), "ITM");
        assert_eq!(serde_json::to_string(&OptionState::Otm).unwrap(), "\"OTM\"");
    }
}
