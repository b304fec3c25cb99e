//! Command handlers
//!
//! Each handler gets a [`CommandContext`]: the repository already loaded
//! from the configured backend, plus the configured suggestion provider.
//! Degraded loads print a notice and continue; no handler aborts the
//! process over a store failure.

pub mod boxes;
pub mod interactive;
pub mod items;
pub mod scan;
pub mod search;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use packrat_config::{PackratConfig, StoreBackend, SuggestProvider};
use packrat_core::{
    InventoryRepository, InventoryStore, NullTagSuggester, SaveOutcome, TagSuggester,
};
use packrat_store_file::FileStore;
use packrat_store_sheet::SheetStore;
use packrat_tagger::HttpTagSuggester;

use crate::cli::OutputFormat;

/// Shared state for one command invocation.
pub struct CommandContext {
    /// Repository, already loaded.
    pub repo: InventoryRepository,
    /// Configured tag-suggestion provider.
    pub suggester: Arc<dyn TagSuggester>,
    /// Budget for one suggestion call.
    pub suggest_timeout: Duration,
    /// Selected output format.
    pub format: OutputFormat,
}

/// Wire up the configured backend and suggester, then load the collection.
///
/// A failed load is not fatal: the session continues on an empty collection
/// after printing a notice, per the read-degradation policy.
pub async fn build_context(config: &PackratConfig, format: OutputFormat) -> Result<CommandContext> {
    config.validate()?;
    debug!(backend = ?config.store.backend, "building store backend");

    let store: Arc<dyn InventoryStore> = match config.store.backend {
        StoreBackend::File => Arc::new(FileStore::new(config.store.file.path.clone())),
        StoreBackend::Sheet => Arc::new(SheetStore::new(
            reqwest::Client::new(),
            config.store.sheet.clone(),
        )),
    };

    let suggester: Arc<dyn TagSuggester> = match config.suggest.provider {
        SuggestProvider::None => Arc::new(NullTagSuggester),
        SuggestProvider::Http => Arc::new(HttpTagSuggester::new(
            reqwest::Client::new(),
            config.suggest.http.clone(),
        )),
    };

    let mut repo = InventoryRepository::new(store);
    let outcome = repo.load().await;
    if let Some(reason) = outcome.degraded {
        eprintln!("warning: could not load collection ({reason}); starting empty");
    }

    Ok(CommandContext {
        repo,
        suggester,
        suggest_timeout: Duration::from_secs(config.suggest.http.timeout_secs),
        format,
    })
}

/// Print the outcome of an upsert in user terms.
pub(crate) fn report_save(box_id: &str, outcome: &SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => println!("Saved {box_id}."),
        SaveOutcome::SkippedEmptyNew => {
            println!("{box_id} has no items and was not saved.");
        }
        SaveOutcome::WriteFailed(reason) => {
            eprintln!("warning: save failed ({reason}); local changes kept for this session");
        }
    }
}
