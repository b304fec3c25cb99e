//! Core data model and synchronization logic for Packrat
//!
//! Packrat tracks physical items grouped into QR-labeled boxes. This crate
//! owns everything with real invariants:
//!
//! - **Model**: [`Item`] and [`InventoryBox`] value types plus tag
//!   normalization
//! - **Storage abstraction**: the [`InventoryStore`] trait with its flattened
//!   record wire form; concrete backends live in their own crates
//! - **Repository**: [`InventoryRepository`], the session-authoritative box
//!   collection and sole writer to the store
//! - **Search**: case-insensitive substring search with highlight spans
//! - **Scan**: identifier normalization and the capture-device lifecycle
//! - **Suggest**: the tag-suggestion collaborator contract
//!
//! Presentation (views, rendering, the QR camera itself) is out of scope;
//! front ends consume this crate through the repository and search APIs.

pub mod model;
pub mod repository;
pub mod scan;
pub mod search;
pub mod store;
pub mod suggest;

pub use model::{
    all_item_names, collection_stats, normalize_tags, parse_tag_input, CollectionStats,
    InventoryBox, Item,
};
pub use repository::{InventoryRepository, LoadOutcome, SaveOutcome};
pub use scan::{normalize_box_id, CaptureDevice, CaptureError, CaptureState, ScanSession};
pub use search::{highlight_spans, search, BoxMatch};
pub use store::{
    flatten_boxes, group_records, InventoryRecord, InventoryStore, MemoryStore, StoreError,
    StoreResult,
};
pub use suggest::{
    suggest_or_empty, NullTagSuggester, SuggestError, TagSuggester, DEFAULT_SUGGEST_TIMEOUT,
};
