//! Whole-file persistence for one record collection

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::collection::Record;
use crate::error::{Result, StoreError};

/// Storage backend for one collection: a single JSON array document.
///
/// Every operation reads or rewrites the whole file. A crash mid-write can
/// truncate the document, so callers get best-effort durability only. The
/// backing file must already exist and hold a valid JSON array; the store
/// never creates it.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the entire backing file and parse it as a JSON array of records.
    pub async fn load_all(&self) -> Result<Vec<Record>> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::Read(format!("{}: {}", self.path.display(), e)))?;

        let records: Vec<Record> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Read(format!("{}: {}", self.path.display(), e)))?;

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Serialize the full sequence and overwrite the backing file in one shot.
    pub async fn save_all(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_vec(records).map_err(|e| StoreError::Write(e.to_string()))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Write(format!("{}: {}", self.path.display(), e)))?;

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
