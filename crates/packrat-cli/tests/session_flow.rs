//! End-to-end session flow over the file backend
//!
//! Two sessions against the same collection file: the first scans a raw
//! payload, creates the box, and adds an item; the second reloads from disk
//! and finds it by search.

use packrat_cli::cli::OutputFormat;
use packrat_cli::commands::build_context;
use packrat_config::{PackratConfig, StoreBackend};
use packrat_core::{normalize_box_id, search, InventoryBox, Item, SaveOutcome};

fn file_config(path: std::path::PathBuf) -> PackratConfig {
    let mut config = PackratConfig::default();
    config.store.backend = StoreBackend::File;
    config.store.file.path = path;
    config
}

#[tokio::test]
async fn test_scan_add_search_flow_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(dir.path().join("boxes.json"));

    // Session 1: resolve a scanned payload and put an item in the new box.
    let mut ctx = build_context(&config, OutputFormat::Table).await.unwrap();
    let box_id = normalize_box_id(" box-001 ").unwrap();
    assert_eq!(box_id, "BOX-001");
    assert!(ctx.repo.get(&box_id).is_none());

    let mut b = InventoryBox::new(&box_id);
    b.add_item(Item::new("Winter Jacket", vec!["outdoor".to_string()]));
    assert_eq!(ctx.repo.upsert_box(b).await, SaveOutcome::Saved);

    // Session 2: a fresh context reloads the collection from disk.
    let ctx = build_context(&config, OutputFormat::Table).await.unwrap();
    assert_eq!(ctx.repo.stats().total_boxes, 1);

    let results = search("JACK", ctx.repo.get_all());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].box_id, "BOX-001");
    assert_eq!(results[0].items[0].name, "Winter Jacket");
}

#[tokio::test]
async fn test_abandoned_new_box_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(dir.path().join("boxes.json"));

    let mut ctx = build_context(&config, OutputFormat::Table).await.unwrap();
    let outcome = ctx.repo.upsert_box(InventoryBox::new("BOX-GHOST")).await;
    assert_eq!(outcome, SaveOutcome::SkippedEmptyNew);

    let ctx = build_context(&config, OutputFormat::Table).await.unwrap();
    assert_eq!(ctx.repo.stats().total_boxes, 0);
}
