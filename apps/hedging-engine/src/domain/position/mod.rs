//! Position Bounded Context
//!
//! Long or short holdings of a single asset.

mod errors;
#[allow(clippy::module_inception)]
mod position;
mod side;

pub use errors::PositionError;
pub use position::Position;
pub use side::PositionSide;
