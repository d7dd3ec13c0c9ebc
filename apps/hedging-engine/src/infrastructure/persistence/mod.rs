//! Persistence Adapters
//!
//! Implementations of the `RecapStore` port.

mod csv_store;
mod in_memory;

pub use csv_store::CsvRecapStore;
pub use in_memory::InMemoryRecapStore;
