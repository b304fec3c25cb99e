//! Substring search across the box collection
//!
//! Matching is purely substring-based and case-insensitive: no tokenization,
//! no fuzzy matching, no relevance ranking. Results preserve collection
//! order, not match-quality order.

use std::ops::Range;

use serde::Serialize;

use crate::model::{InventoryBox, Item};

/// One box reduced to its matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxMatch {
    /// Identifier of the matched box.
    pub box_id: String,
    /// The box's matching items, in their original order.
    pub items: Vec<Item>,
}

/// Search the collection for items whose name or any tag contains the query.
///
/// The collection is read-only; matched items are cloned into the result.
/// Box order and item order follow the input collection, and boxes whose
/// reduced item list would be empty are excluded. An empty or
/// whitespace-only query returns no results (there is no "show all"
/// fallback).
pub fn search(query: &str, boxes: &[InventoryBox]) -> Vec<BoxMatch> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    boxes
        .iter()
        .filter_map(|b| {
            let items: Vec<Item> = b
                .items
                .iter()
                .filter(|item| item_matches(item, &needle))
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(BoxMatch {
                    box_id: b.id.clone(),
                    items,
                })
            }
        })
        .collect()
}

fn item_matches(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Ranges index into the original `text` and are suitable for slicing when
/// rendering highlights. Occurrences never overlap: scanning resumes after
/// the end of each match. An empty or whitespace-only query yields no spans,
/// so callers render the text verbatim.
pub fn highlight_spans(text: &str, query: &str) -> Vec<Range<usize>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    // Lowercase char by char, tracking which original byte range each byte
    // of the lowered text came from. Lowercasing can change byte lengths
    // (e.g. İ), so spans cannot be read off the lowered string directly.
    let mut lowered = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        let end = offset + ch.len_utf8();
        for lc in ch.to_lowercase() {
            for _ in 0..lc.len_utf8() {
                origin.push((offset, end));
            }
            lowered.push(lc);
        }
    }

    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(pos) = lowered[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        spans.push(origin[start].0..origin[end - 1].1);
        from = end;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_collection() -> Vec<InventoryBox> {
        let mut winter = InventoryBox::new("BOX-WINTER");
        winter.add_item(Item::with_id(
            "ITEM-1",
            "Winter Jacket",
            vec!["outdoor".to_string(), "warm".to_string()],
        ));
        winter.add_item(Item::with_id("ITEM-2", "Ski Gloves", vec![]));

        let mut kitchen = InventoryBox::new("BOX-KITCHEN");
        kitchen.add_item(Item::with_id("ITEM-3", "Blender", vec!["appliance".to_string()]));

        vec![winter, kitchen]
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let boxes = sample_collection();
        assert!(search("", &boxes).is_empty());
        assert!(search("   ", &boxes).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_on_names() {
        let boxes = sample_collection();
        let results = search("JACK", &boxes);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].box_id, "BOX-WINTER");
        assert_eq!(results[0].items.len(), 1);
        assert_eq!(results[0].items[0].name, "Winter Jacket");
    }

    #[test]
    fn test_search_matches_tags_as_substrings() {
        let boxes = sample_collection();
        let results = search("door", &boxes);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].items[0].name, "Winter Jacket");
    }

    #[test]
    fn test_search_excludes_boxes_without_matches() {
        let boxes = sample_collection();
        let results = search("blender", &boxes);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].box_id, "BOX-KITCHEN");
    }

    #[test]
    fn test_search_preserves_collection_order() {
        let mut boxes = sample_collection();
        boxes[1].add_item(Item::with_id("ITEM-4", "Winter Boots", vec![]));
        let results = search("winter", &boxes);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].box_id, "BOX-WINTER");
        assert_eq!(results[1].box_id, "BOX-KITCHEN");
    }

    #[test]
    fn test_highlight_spans_finds_all_occurrences() {
        let spans = highlight_spans("banana", "an");
        assert_eq!(spans, vec![1..3, 3..5]);
    }

    #[test]
    fn test_highlight_spans_case_insensitive() {
        let spans = highlight_spans("Winter Jacket", "jack");
        assert_eq!(spans, vec![7..11]);
        assert_eq!(&"Winter Jacket"[7..11], "Jack");
    }

    #[test]
    fn test_highlight_spans_empty_query() {
        assert!(highlight_spans("anything", "").is_empty());
        assert!(highlight_spans("anything", "  ").is_empty());
    }

    #[test]
    fn test_highlight_spans_no_match() {
        assert!(highlight_spans("Winter Jacket", "zzz").is_empty());
    }

    #[test]
    fn test_highlight_spans_multibyte_text() {
        // Spans must be valid byte ranges into the original string.
        let text = "Überraschung";
        let spans = highlight_spans(text, "über");
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].clone()], "Über");
    }
}
