//! In-memory recap store for testing.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{PersistenceError, RecapRow, RecapStore};

/// In-memory implementation of `RecapStore`.
///
/// Suitable for testing and dry runs. Rows are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryRecapStore {
    rows: RwLock<Vec<RecapRow>>,
}

impl InMemoryRecapStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding existing rows.
    #[must_use]
    pub fn with_rows(rows: Vec<RecapRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Copy of the stored rows.
    #[must_use]
    pub fn rows(&self) -> Vec<RecapRow> {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecapStore for InMemoryRecapStore {
    async fn load(&self) -> Result<Vec<RecapRow>, PersistenceError> {
        Ok(self.rows())
    }

    async fn append(&self, rows: &[RecapRow]) -> Result<(), PersistenceError> {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(rows);
        Ok(())
    }
}
