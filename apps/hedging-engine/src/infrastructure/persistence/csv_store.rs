//! CSV recap store.
//!
//! One header row with the recap column names, then one row per snapshot.
//! Times are RFC 3339. Appends never rewrite existing rows.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{PersistenceError, RECAP_COLUMNS, RecapRow, RecapStore};

/// Recap rows stored in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvRecapStore {
    path: PathBuf,
}

impl CsvRecapStore {
    /// Store backed by `path` (created on first append).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn csv_error(path: &Path, row: usize, err: csv::Error) -> PersistenceError {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(source) = err.into_kind() {
                return Self::io_error(path, source);
            }
            return Self::io_error(path, io::Error::other("csv I/O error"));
        }
        PersistenceError::Malformed {
            row,
            message: err.to_string(),
        }
    }

    fn read_rows(path: &Path) -> Result<Vec<RecapRow>, PersistenceError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(path, e)),
        };
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| Self::csv_error(path, 0, e))?
            .clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if !headers.iter().eq(RECAP_COLUMNS) {
            return Err(PersistenceError::HeaderMismatch {
                expected: RECAP_COLUMNS.join(","),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        reader
            .deserialize::<RecapRow>()
            .enumerate()
            .map(|(index, row)| row.map_err(|e| Self::csv_error(path, index + 1, e)))
            .collect()
    }

    fn write_rows(path: &Path, rows: &[RecapRow]) -> Result<(), PersistenceError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Self::io_error(path, e))?;
        let is_new = file.metadata().map_err(|e| Self::io_error(path, e))?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer
                .write_record(RECAP_COLUMNS)
                .map_err(|e| Self::csv_error(path, 0, e))?;
        }
        for (index, row) in rows.iter().enumerate() {
            writer
                .serialize(row)
                .map_err(|e| Self::csv_error(path, index + 1, e))?;
        }
        writer.flush().map_err(|e| Self::io_error(path, e))
    }
}

#[async_trait]
impl RecapStore for CsvRecapStore {
    async fn load(&self) -> Result<Vec<RecapRow>, PersistenceError> {
        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || Self::read_rows(&path))
            .await
            .map_err(|e| Self::io_error(&self.path, io::Error::other(e)))??;
        debug!(path = %self.path.display(), rows = rows.len(), "Recap rows loaded");
        Ok(rows)
    }

    async fn append(&self, rows: &[RecapRow]) -> Result<(), PersistenceError> {
        if rows.is_empty() {
            return Ok(());
        }
        let path = self.path.clone();
        let batch = rows.to_vec();
        tokio::task::spawn_blocking(move || Self::write_rows(&path, &batch))
            .await
            .map_err(|e| Self::io_error(&self.path, io::Error::other(e)))??;
        debug!(path = %self.path.display(), rows = rows.len(), "Recap rows appended");
        Ok(())
    }
}
