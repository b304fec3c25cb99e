//! Rendering helpers: tables, search highlighting, JSON

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use packrat_core::{highlight_spans, BoxMatch, CollectionStats, InventoryBox};

/// Table of every box with its item count.
pub fn boxes_table(boxes: &[InventoryBox]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Box", "Items"]);
    for b in boxes {
        table.add_row(vec![Cell::new(&b.id), Cell::new(b.item_count())]);
    }
    table
}

/// Table of one box's items.
pub fn items_table(b: &InventoryBox) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Item", "Name", "Tags"]);
    for item in &b.items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(&item.name),
            Cell::new(item.tags.join(", ")),
        ]);
    }
    table
}

/// One line per collection total.
pub fn stats_lines(stats: &CollectionStats) -> String {
    format!(
        "Total boxes: {}\nTotal items: {}",
        stats.total_boxes, stats.total_items
    )
}

/// Render `text` with every case-insensitive occurrence of `query`
/// highlighted. Whitespace-only queries render the text verbatim.
pub fn highlight(text: &str, query: &str) -> String {
    let spans = highlight_spans(text, query);
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&text[span.clone()].black().on_yellow().to_string());
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Print search results: summary line, then each box with its matching
/// items, query occurrences highlighted in names and tags.
pub fn print_search_results(results: &[BoxMatch], query: &str) {
    println!("Found {} box(es) for \"{}\"", results.len(), query);
    if results.is_empty() {
        println!("No items found matching your search.");
        return;
    }
    for result in results {
        println!("\n{}", result.box_id.bold());
        for item in &result.items {
            if item.tags.is_empty() {
                println!("  {}", highlight(&item.name, query));
            } else {
                let tags: Vec<String> =
                    item.tags.iter().map(|tag| highlight(tag, query)).collect();
                println!("  {} [{}]", highlight(&item.name, query), tags.join(", "));
            }
        }
    }
}
