//! Item and box value types
//!
//! An [`Item`] is a single inventory entry (name plus free-text search tags);
//! an [`InventoryBox`] is an ordered group of items behind one QR label. Both
//! are plain serde values; all collection-level invariants are enforced by
//! the repository.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single inventory entry with a display name and free-text tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique identifier, generated client-side at creation and never
    /// reused. Unique within the owning box only.
    pub id: String,

    /// Non-empty display name; the unit users search by.
    pub name: String,

    /// Lowercase, trimmed tags in insertion order. Duplicates are allowed;
    /// no dedup is performed.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// Create an item with a freshly generated identifier.
    ///
    /// Tags are normalized (trimmed, lowercased, empties dropped) on the way
    /// in; order is preserved.
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            tags: normalize_tags(tags),
        }
    }

    /// Create an item with an explicit identifier, e.g. when reconstructing
    /// from stored records.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: normalize_tags(tags),
        }
    }
}

/// Generate a fresh item identifier.
pub fn generate_item_id() -> String {
    format!("ITEM-{}", Uuid::new_v4().simple())
}

/// A named group of items, identified by a unique uppercase string.
///
/// Conceptually just a "box"; the type carries a prefix to stay clear of
/// the `Box` in the Rust prelude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBox {
    /// Unique identifier within the collection, case-normalized to
    /// uppercase by the scan resolver before it reaches this type.
    pub id: String,

    /// Items in insertion order. Empty is valid: the box exists but holds
    /// nothing.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl InventoryBox {
    /// Create an empty box.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    /// Append an item, preserving insertion order.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove the item with the given id, returning it if present.
    ///
    /// Edits are modeled as remove-then-add; there is no in-place update.
    pub fn remove_item(&mut self, item_id: &str) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(idx))
    }

    /// Whether the box holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in the box.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Normalize raw tag strings: trim, lowercase, drop empties.
///
/// Insertion order is preserved and duplicates are kept.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref().trim().to_lowercase();
            if tag.is_empty() {
                None
            } else {
                Some(tag)
            }
        })
        .collect()
}

/// Parse a comma-separated tag field into normalized tags.
pub fn parse_tag_input(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

/// Collection-level counts for the dashboard summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    /// Total number of boxes, empty ones included.
    pub total_boxes: usize,
    /// Total number of items across all boxes.
    pub total_items: usize,
}

/// Compute box and item totals over a collection.
pub fn collection_stats(boxes: &[InventoryBox]) -> CollectionStats {
    CollectionStats {
        total_boxes: boxes.len(),
        total_items: boxes.iter().map(InventoryBox::item_count).sum(),
    }
}

/// Deduplicated, sorted list of every item name in the collection.
///
/// Used by front ends as an entry-completion source when adding items.
pub fn all_item_names(boxes: &[InventoryBox]) -> Vec<String> {
    let mut names: Vec<String> = boxes
        .iter()
        .flat_map(|b| b.items.iter().map(|item| item.name.clone()))
        .collect();
    names.sort();
    names.dedup();
    names
}
