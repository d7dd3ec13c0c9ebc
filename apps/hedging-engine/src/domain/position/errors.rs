//! Position Errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when opening a position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Quantity is zero or negative; the side carries the sign.
    #[error("Position quantity must be strictly positive, got {quantity}")]
    NonPositiveQuantity {
        /// Quantity supplied.
        quantity: Decimal,
    },
}
