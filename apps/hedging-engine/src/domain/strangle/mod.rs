//! Strangle Bounded Context
//!
//! A call and a put on the same side and maturity, the spot hedges opened
//! against them and the recap log of their delta state.

mod errors;
mod ledger;
mod policy;
#[allow(clippy::module_inception)]
mod strangle;

pub use errors::StrangleError;
pub use ledger::{HedgeLedger, RecapLog, RecapSnapshot};
pub use policy::{DEFAULT_DELTA_PRECISION, DeltaPolicy};
pub use strangle::{HedgeInstrument, Strangle};
