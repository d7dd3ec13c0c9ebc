//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable pricing inputs, contracts and snapshots
//! - **Aggregates**: The strangle and its append-only ledgers
//! - **Domain Services**: The pure Black-Scholes model
//!
//! # Bounded Contexts
//!
//! - [`pricing`]: Black-Scholes price, greeks, moneyness and forwards
//! - [`instruments`]: Options and spot assets behind the `Valuation` capability
//! - [`position`]: Long/short holdings of one asset
//! - [`strangle`]: Two-legged strangle, hedge ledger and recap log

pub mod instruments;
pub mod position;
pub mod pricing;
pub mod shared;
pub mod strangle;
