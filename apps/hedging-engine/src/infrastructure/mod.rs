//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - `market_data/`: price sources (in-memory, CSV replay) and the guard
//!   adding timeouts, retries and staleness checks
//! - `persistence/`: recap stores (in-memory, CSV)
//! - `config/`: dependency injection container

pub mod config;
pub mod market_data;
pub mod persistence;
