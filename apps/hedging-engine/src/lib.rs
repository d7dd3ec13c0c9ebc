// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Hedging Engine - Rust Core Library
//!
//! Black-Scholes pricing of vanilla and FX options, a two-legged strangle
//! built from them, and a delta-hedging engine that keeps it neutral with
//! spot positions while recording an append-only recap of deltas.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core pricing and position logic
//!   - `pricing`: Black-Scholes price, delta, gamma, moneyness, forwards
//!   - `instruments`: Option contracts and spot assets (`Valuation`)
//!   - `position`: Long/short holdings with payoff and profit
//!   - `strangle`: Strangle aggregate, hedge ledger, recap log
//!
//! - **Application**: Orchestration
//!   - `ports`: `MarketDataProvider`, `RecapStore`
//!   - `services`: `HedgingEngine`
//!
//! - **Infrastructure**: Adapters
//!   - `market_data`: In-memory, CSV replay, guarded wrapper
//!   - `persistence`: In-memory and CSV recap stores
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and wiring.
pub mod infrastructure;

// =============================================================================
// Ambient Modules
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::instruments::{
    Asset, AssetClass, OptionContract, OptionTerms, SpotAsset, SpotClass, Valuation,
};
pub use domain::position::{Position, PositionError, PositionSide};
pub use domain::pricing::{
    BlackScholesInputs, OptionState, OptionType, PricingError, Rates, forward_price,
};
pub use domain::shared::{Symbol, Timestamp};
pub use domain::strangle::{
    DeltaPolicy, HedgeInstrument, HedgeLedger, RecapLog, RecapSnapshot, Strangle, StrangleError,
};

// Application re-exports
pub use application::ports::{
    MarketDataError, MarketDataProvider, NoOpRecapStore, PersistenceError, PriceObservation,
    RecapRow, RecapStore,
};
pub use application::services::{HedgeOutcome, HedgingEngine, HedgingError, HedgingSettings};

// Infrastructure re-exports
pub use infrastructure::config::{Container, ContainerError};
pub use infrastructure::market_data::{
    GuardPolicy, GuardedMarketData, InMemoryMarketData, ReplayMarketData, RetryPolicy,
};
pub use infrastructure::persistence::{CsvRecapStore, InMemoryRecapStore};
