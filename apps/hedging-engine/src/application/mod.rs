//! Application Layer
//!
//! The application layer orchestrates domain logic.
//! It defines:
//!
//! - **Ports**: Interfaces for market data and recap persistence
//! - **Services**: The delta-hedging engine

pub mod ports;
pub mod services;

pub use ports::*;
pub use services::*;
