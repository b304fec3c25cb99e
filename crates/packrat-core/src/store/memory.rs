//! In-memory store
//!
//! Backs tests and credential-less operation. Supports failure injection so
//! repository degradation paths can be exercised without a real backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::InventoryBox;
use crate::store::{InventoryStore, StoreError, StoreResult};

/// [`InventoryStore`] holding the collection in process memory.
#[derive(Default)]
pub struct MemoryStore {
    boxes: Mutex<Vec<InventoryBox>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a collection.
    pub fn with_boxes(boxes: Vec<InventoryBox>) -> Self {
        Self {
            boxes: Mutex::new(boxes),
            ..Self::default()
        }
    }

    /// Make subsequent `load_all` calls fail with a network error.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `save_all` calls fail with a network error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the currently persisted collection.
    pub fn snapshot(&self) -> Vec<InventoryBox> {
        self.boxes.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn load_all(&self) -> StoreResult<Vec<InventoryBox>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Network("injected load failure".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn save_all(&self, boxes: &[InventoryBox]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Network("injected save failure".to_string()));
        }
        *self.boxes.lock().expect("store mutex poisoned") = boxes.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let store = MemoryStore::new();
        let boxes = vec![InventoryBox::new("BOX-001")];

        store.save_all(&boxes).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), boxes);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::with_boxes(vec![InventoryBox::new("BOX-001")]);

        store.set_fail_loads(true);
        assert!(store.load_all().await.is_err());

        store.set_fail_loads(false);
        store.set_fail_saves(true);
        assert!(store.save_all(&[]).await.is_err());
        // The failed save must not have touched the persisted collection.
        assert_eq!(store.snapshot().len(), 1);
    }
}
