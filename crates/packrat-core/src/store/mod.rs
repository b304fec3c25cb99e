//! Storage abstraction for the box collection
//!
//! The store is the durable keeper of the full collection. It exposes exactly
//! two operations, wholesale read and wholesale write, so any flat file,
//! key-value store, or remote spreadsheet can sit behind the same contract
//! without touching the repository.
//!
//! Concrete backends live in their own crates (`packrat-store-file`,
//! `packrat-store-sheet`); [`MemoryStore`] here covers tests and
//! credential-less operation.

pub mod error;
pub mod memory;
pub mod records;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use records::{flatten_boxes, group_records, InventoryRecord};

use async_trait::async_trait;

use crate::model::InventoryBox;

/// Durable keeper of the full box collection.
///
/// There is no incremental write: `save_all` replaces the persisted
/// collection with the given snapshot, and concurrent sessions overwrite
/// each other last-writer-wins. Implementations must be `Send + Sync` so the
/// repository can hold them across async boundaries.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Fetch the entire persisted collection.
    async fn load_all(&self) -> StoreResult<Vec<InventoryBox>>;

    /// Replace the persisted collection with this snapshot.
    async fn save_all(&self, boxes: &[InventoryBox]) -> StoreResult<()>;
}
