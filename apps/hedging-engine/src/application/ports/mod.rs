//! Application Ports (Driven)
//!
//! Ports define how the hedging engine uses external systems:
//! a market-data source for spot prices and a store for recap rows.

mod market_data_port;
mod recap_store_port;

pub use market_data_port::{MarketDataError, MarketDataProvider, PriceObservation};
pub use recap_store_port::{
    NoOpRecapStore, PersistenceError, RECAP_COLUMNS, RecapRow, RecapStore,
};
