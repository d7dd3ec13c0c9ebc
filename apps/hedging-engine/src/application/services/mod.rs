//! Application Services
//!
//! Application services coordinate domain logic and the driven ports.

mod hedging_engine;

pub use hedging_engine::{
    DEFAULT_FX_SUFFIX, HedgeOutcome, HedgingEngine, HedgingError, HedgingSettings,
};
