//! Component wiring.

mod container;

pub use container::{
    Container, ContainerError, DynHedgingEngine, atm_forward_strike, build_market_data,
    build_strangle, delta_policy, guard_policy, hedging_settings, rates,
};
