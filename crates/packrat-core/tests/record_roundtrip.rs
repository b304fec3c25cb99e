//! Property tests for the flattened record wire form
//!
//! The contract: flattening a well-formed collection (every box has an id,
//! every item has an id and a name) and regrouping the rows yields the same
//! collection, empty boxes included.

use packrat_core::{flatten_boxes, group_records, InventoryBox, Item};
use proptest::prelude::*;

fn item_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,15}",
        prop::collection::vec("[a-z]{1,8}", 0..4),
    )
}

fn collection_strategy() -> impl Strategy<Value = Vec<InventoryBox>> {
    prop::collection::vec(prop::collection::vec(item_strategy(), 0..5), 0..6).prop_map(|shape| {
        shape.into_iter()
            .enumerate()
            .map(|(i, items)| {
                let mut b = InventoryBox::new(format!("BOX-{i}"));
                for (name, tags) in items {
                    b.add_item(Item::new(name, tags));
                }
                b
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn roundtrip_is_identity(boxes in collection_strategy()) {
        let back = group_records(flatten_boxes(&boxes));
        prop_assert_eq!(back, boxes);
    }

    #[test]
    fn flatten_row_count_matches(boxes in collection_strategy()) {
        let rows = flatten_boxes(&boxes);
        let expected: usize = boxes
            .iter()
            .map(|b| if b.is_empty() { 1 } else { b.item_count() })
            .sum();
        prop_assert_eq!(rows.len(), expected);
    }
}
