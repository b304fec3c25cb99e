//! Flattened record wire form
//!
//! Row-oriented backends (the spreadsheet feed, CSV-ish exports) exchange the
//! collection as one row per item: `box_id`, `item_id`, `item_name`, and
//! `item_tags` comma-joined. A box with zero items is represented by a single
//! placeholder row carrying only its `box_id`.
//!
//! Grouping is the inverse: rows sharing a `box_id` fold into one box, first
//! seen box order and row order of items preserved. A row without a `box_id`
//! is dropped entirely; a row with a `box_id` but no `item_name` registers
//! the box and contributes no item, which is what lets placeholder rows
//! round-trip empty boxes. A row missing its `item_id` gets a freshly
//! generated one.

use serde::{Deserialize, Serialize};

use crate::model::{generate_item_id, normalize_tags, InventoryBox, Item};

/// One row of the flattened collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Owning box identifier. Rows with an empty value are skipped.
    pub box_id: String,

    /// Item identifier; empty for placeholder rows.
    #[serde(default)]
    pub item_id: String,

    /// Item display name; empty for placeholder rows.
    #[serde(default)]
    pub item_name: String,

    /// Comma-joined tags.
    #[serde(default)]
    pub item_tags: String,
}

impl InventoryRecord {
    /// Placeholder row marking that an empty box exists.
    pub fn placeholder(box_id: impl Into<String>) -> Self {
        Self {
            box_id: box_id.into(),
            item_id: String::new(),
            item_name: String::new(),
            item_tags: String::new(),
        }
    }
}

/// Flatten a collection into rows, one per item.
///
/// Boxes with zero items produce one placeholder row so their existence
/// survives the round trip.
pub fn flatten_boxes(boxes: &[InventoryBox]) -> Vec<InventoryRecord> {
    let mut rows = Vec::new();
    for b in boxes {
        if b.items.is_empty() {
            rows.push(InventoryRecord::placeholder(&b.id));
            continue;
        }
        for item in &b.items {
            rows.push(InventoryRecord {
                box_id: b.id.clone(),
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                item_tags: item.tags.join(","),
            });
        }
    }
    rows
}

/// Reassemble boxes from flattened rows.
pub fn group_records(rows: Vec<InventoryRecord>) -> Vec<InventoryBox> {
    let mut boxes: Vec<InventoryBox> = Vec::new();
    for row in rows {
        if row.box_id.is_empty() {
            continue;
        }
        let idx = match boxes.iter().position(|b| b.id == row.box_id) {
            Some(idx) => idx,
            None => {
                boxes.push(InventoryBox::new(&row.box_id));
                boxes.len() - 1
            }
        };
        // Placeholder and malformed rows register the box but carry no item.
        if row.item_name.is_empty() {
            continue;
        }
        let id = if row.item_id.is_empty() {
            generate_item_id()
        } else {
            row.item_id
        };
        boxes[idx].items.push(Item {
            id,
            name: row.item_name,
            tags: normalize_tags(row.item_tags.split(',')),
        });
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_boxes() -> Vec<InventoryBox> {
        let mut a = InventoryBox::new("BOX-A");
        a.add_item(Item::with_id(
            "ITEM-1",
            "Winter Jacket",
            vec!["outdoor".to_string(), "warm".to_string()],
        ));
        a.add_item(Item::with_id("ITEM-2", "Scarf", vec![]));
        let b = InventoryBox::new("BOX-B");
        vec![a, b]
    }

    #[test]
    fn test_flatten_emits_placeholder_for_empty_box() {
        let rows = flatten_boxes(&sample_boxes());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].box_id, "BOX-A");
        assert_eq!(rows[0].item_tags, "outdoor,warm");
        assert_eq!(rows[2], InventoryRecord::placeholder("BOX-B"));
    }

    #[test]
    fn test_group_skips_rows_without_box_id() {
        let rows = vec![
            InventoryRecord {
                box_id: String::new(),
                item_id: "ITEM-9".to_string(),
                item_name: "Orphan".to_string(),
                item_tags: String::new(),
            },
            InventoryRecord {
                box_id: "BOX-A".to_string(),
                item_id: "ITEM-1".to_string(),
                item_name: "Lamp".to_string(),
                item_tags: String::new(),
            },
        ];

        let boxes = group_records(rows);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].id, "BOX-A");
        assert_eq!(boxes[0].item_count(), 1);
    }

    #[test]
    fn test_group_generates_missing_item_ids() {
        let rows = vec![InventoryRecord {
            box_id: "BOX-A".to_string(),
            item_id: String::new(),
            item_name: "Lamp".to_string(),
            item_tags: String::new(),
        }];

        let boxes = group_records(rows);
        assert!(boxes[0].items[0].id.starts_with("ITEM-"));
    }

    #[test]
    fn test_group_preserves_box_and_item_order() {
        let rows = vec![
            InventoryRecord {
                box_id: "BOX-B".to_string(),
                item_id: "ITEM-3".to_string(),
                item_name: "Cable".to_string(),
                item_tags: String::new(),
            },
            InventoryRecord {
                box_id: "BOX-A".to_string(),
                item_id: "ITEM-1".to_string(),
                item_name: "Lamp".to_string(),
                item_tags: String::new(),
            },
            InventoryRecord {
                box_id: "BOX-B".to_string(),
                item_id: "ITEM-4".to_string(),
                item_name: "Plug".to_string(),
                item_tags: String::new(),
            },
        ];

        let boxes = group_records(rows);
        assert_eq!(boxes[0].id, "BOX-B");
        assert_eq!(boxes[1].id, "BOX-A");
        assert_eq!(boxes[0].items[0].name, "Cable");
        assert_eq!(boxes[0].items[1].name, "Plug");
    }

    #[test]
    fn test_roundtrip_preserves_empty_boxes() {
        let boxes = sample_boxes();
        let back = group_records(flatten_boxes(&boxes));

        assert_eq!(back, boxes);
    }
}
