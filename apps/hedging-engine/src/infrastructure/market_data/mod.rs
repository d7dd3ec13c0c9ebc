//! Market Data Adapters
//!
//! Implementations of the `MarketDataProvider` port.

mod guarded;
mod in_memory;
mod replay;
mod retry;

pub use guarded::{GuardPolicy, GuardedMarketData};
pub use in_memory::InMemoryMarketData;
pub use replay::ReplayMarketData;
pub use retry::{ExponentialBackoff, RetryPolicy};
