//! Session-authoritative box collection
//!
//! [`InventoryRepository`] owns the in-memory collection for the current
//! session and is the sole writer to the [`InventoryStore`]. Failure policy,
//! per the error design: read failures degrade to an empty collection with a
//! surfaced notice, write failures keep the optimistic in-memory state and
//! surface a notice, and nothing here is fatal. Single attempt, no retries.
//!
//! The repository is not designed for concurrent writers; callers serialize
//! saves per session, and concurrent sessions overwrite each other wholesale
//! (last writer wins).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::{all_item_names, collection_stats, CollectionStats, InventoryBox};
use crate::store::InventoryStore;

/// Result of a [`InventoryRepository::load`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Number of boxes now in memory.
    pub loaded: usize,
    /// Present when the store read failed and the session degraded to an
    /// empty collection. Carries a user-displayable reason.
    pub degraded: Option<String>,
}

/// Result of a [`InventoryRepository::upsert_box`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Collection persisted with the box in place.
    Saved,
    /// Brand-new box with zero items: dropped, not persisted, not retained.
    SkippedEmptyNew,
    /// In-memory state holds the optimistic new value but the store write
    /// failed. Not rolled back.
    WriteFailed(String),
}

/// In-memory authoritative collection of boxes for one session.
pub struct InventoryRepository {
    store: Arc<dyn InventoryStore>,
    boxes: Vec<InventoryBox>,
}

impl InventoryRepository {
    /// Create a repository over the given store. The collection starts empty
    /// until [`load`](Self::load) is called.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            store,
            boxes: Vec::new(),
        }
    }

    /// Fetch the full collection from the store, replacing the in-memory
    /// state wholesale.
    ///
    /// Never returns an error: on transport or parse failure the collection
    /// degrades to empty and the reason is surfaced in the outcome.
    pub async fn load(&mut self) -> LoadOutcome {
        match self.store.load_all().await {
            Ok(boxes) => {
                debug!(count = boxes.len(), "loaded box collection");
                self.boxes = boxes;
                LoadOutcome {
                    loaded: self.boxes.len(),
                    degraded: None,
                }
            }
            Err(err) => {
                warn!("store read failed, continuing with empty collection: {err}");
                self.boxes = Vec::new();
                LoadOutcome {
                    loaded: 0,
                    degraded: Some(err.to_string()),
                }
            }
        }
    }

    /// Current in-memory collection. No side effects.
    pub fn get_all(&self) -> &[InventoryBox] {
        &self.boxes
    }

    /// Look up a box by identifier.
    pub fn get(&self, box_id: &str) -> Option<&InventoryBox> {
        self.boxes.iter().find(|b| b.id == box_id)
    }

    /// Box and item totals for the dashboard summary.
    pub fn stats(&self) -> CollectionStats {
        collection_stats(&self.boxes)
    }

    /// Deduplicated sorted item names, for entry completion.
    pub fn item_names(&self) -> Vec<String> {
        all_item_names(&self.boxes)
    }

    /// Replace the box with the same identifier (or append if new), then
    /// write the entire collection back to the store.
    ///
    /// Two-phase optimistic: memory is updated first, and a failed write is
    /// reported but never rolled back. A brand-new box with zero items is a
    /// no-op on persistence: it is dropped rather than saved.
    pub async fn upsert_box(&mut self, new_box: InventoryBox) -> SaveOutcome {
        let existing = self.boxes.iter().position(|b| b.id == new_box.id);
        match existing {
            Some(idx) => self.boxes[idx] = new_box,
            None if new_box.is_empty() => {
                debug!(box_id = %new_box.id, "dropping empty new box");
                return SaveOutcome::SkippedEmptyNew;
            }
            None => self.boxes.push(new_box),
        }

        match self.store.save_all(&self.boxes).await {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                warn!("store write failed, keeping optimistic local state: {err}");
                SaveOutcome::WriteFailed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use crate::store::MemoryStore;

    fn boxed_with_item(box_id: &str, item_name: &str) -> InventoryBox {
        let mut b = InventoryBox::new(box_id);
        b.add_item(Item::new(item_name, vec![]));
        b
    }

    #[tokio::test]
    async fn test_upsert_keeps_ids_unique() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = InventoryRepository::new(store.clone());
        repo.load().await;

        assert_eq!(
            repo.upsert_box(boxed_with_item("BOX-A", "Lamp")).await,
            SaveOutcome::Saved
        );
        assert_eq!(
            repo.upsert_box(boxed_with_item("BOX-B", "Cable")).await,
            SaveOutcome::Saved
        );
        // Replacing BOX-A must not disturb BOX-B.
        assert_eq!(
            repo.upsert_box(boxed_with_item("BOX-A", "Plug")).await,
            SaveOutcome::Saved
        );

        let ids: Vec<_> = repo.get_all().iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids, vec!["BOX-A", "BOX-B"]);
        assert_eq!(repo.get("BOX-A").unwrap().items[0].name, "Plug");
        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_new_box_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = InventoryRepository::new(store.clone());
        repo.load().await;

        let outcome = repo.upsert_box(InventoryBox::new("BOX-NEW")).await;
        assert_eq!(outcome, SaveOutcome::SkippedEmptyNew);
        assert!(repo.get_all().is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_empty_existing_box_still_saved() {
        let store = Arc::new(MemoryStore::with_boxes(vec![boxed_with_item(
            "BOX-A", "Lamp",
        )]));
        let mut repo = InventoryRepository::new(store.clone());
        repo.load().await;

        // Emptying an existing box is a legitimate update.
        let outcome = repo.upsert_box(InventoryBox::new("BOX-A")).await;
        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(store.snapshot()[0].is_empty());
    }

    #[tokio::test]
    async fn test_load_degrades_to_empty_on_failure() {
        let store = Arc::new(MemoryStore::with_boxes(vec![boxed_with_item(
            "BOX-A", "Lamp",
        )]));
        store.set_fail_loads(true);
        let mut repo = InventoryRepository::new(store.clone());

        let outcome = repo.load().await;
        assert_eq!(outcome.loaded, 0);
        assert!(outcome.degraded.is_some());
        assert!(repo.get_all().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_optimistic_state() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = InventoryRepository::new(store.clone());
        repo.load().await;
        store.set_fail_saves(true);

        let outcome = repo.upsert_box(boxed_with_item("BOX-A", "Lamp")).await;
        assert!(matches!(outcome, SaveOutcome::WriteFailed(_)));
        // Local state kept, store untouched.
        assert_eq!(repo.get_all().len(), 1);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_stats_and_item_names() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = InventoryRepository::new(store);
        repo.load().await;
        repo.upsert_box(boxed_with_item("BOX-A", "Lamp")).await;
        repo.upsert_box(boxed_with_item("BOX-B", "Cable")).await;

        let stats = repo.stats();
        assert_eq!(stats.total_boxes, 2);
        assert_eq!(stats.total_items, 2);
        assert_eq!(repo.item_names(), vec!["Cable", "Lamp"]);
    }
}
