//! JSON flat-file storage backend for Packrat
//!
//! Persists the whole box collection as one JSON document on local disk, the
//! lightweight default when no remote store is configured. Every save
//! rewrites the file wholesale, matching the store contract: no incremental
//! writes, last writer wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use packrat_core::{InventoryBox, InventoryStore, StoreError, StoreResult};

/// [`InventoryStore`] backed by a single JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given file path. The file need not exist yet;
    /// a missing file reads as an empty collection.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl InventoryStore for FileStore {
    async fn load_all(&self) -> StoreResult<Vec<InventoryBox>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "collection file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::from(err)),
        };
        let boxes: Vec<InventoryBox> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), count = boxes.len(), "loaded collection file");
        Ok(boxes)
    }

    async fn save_all(&self, boxes: &[InventoryBox]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(boxes)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), count = boxes.len(), "wrote collection file");
        Ok(())
    }
}
