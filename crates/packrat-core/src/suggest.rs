//! Tag-suggestion collaborator contract
//!
//! Given an item name, a [`TagSuggester`] returns a handful of lowercase
//! searchable tags. Suggestions are optional enrichment: every failure maps
//! to an empty list through [`suggest_or_empty`] and item creation proceeds
//! regardless. The HTTP-backed provider lives in `packrat-tagger`; this
//! module defines the trait so front ends depend only on core.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::model::normalize_tags;

/// Suggestion failures. All of them are non-fatal to the caller.
#[derive(Error, Debug, Clone)]
pub enum SuggestError {
    /// Required credential (API key) is not configured.
    #[error("suggestion credential missing: {0}")]
    MissingCredential(String),

    /// Transport-level failure reaching the provider.
    #[error("suggestion request failed: {0}")]
    Network(String),

    /// The provider responded with something other than a tag array.
    #[error("malformed suggestion response: {0}")]
    MalformedResponse(String),

    /// The provider took longer than the caller's budget.
    #[error("suggestion timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

/// Upper bound applied by [`suggest_or_empty`] so item creation never blocks
/// indefinitely on the collaborator.
pub const DEFAULT_SUGGEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Produces candidate tags for an item name.
#[async_trait]
pub trait TagSuggester: Send + Sync {
    /// Suggest up to roughly five lowercase single-word tags for the given
    /// non-empty item name.
    async fn suggest(&self, item_name: &str) -> Result<Vec<String>, SuggestError>;
}

/// Suggester that always returns no tags. Used when no provider is
/// configured, keeping the add-item flow credential-free.
pub struct NullTagSuggester;

#[async_trait]
impl TagSuggester for NullTagSuggester {
    async fn suggest(&self, _item_name: &str) -> Result<Vec<String>, SuggestError> {
        Ok(Vec::new())
    }
}

/// Fetch suggestions, mapping every failure (including timeout) to an empty
/// list.
///
/// The returned tags are normalized like any other tag input. An empty item
/// name short-circuits to no tags without calling the provider.
pub async fn suggest_or_empty(
    suggester: &dyn TagSuggester,
    item_name: &str,
    timeout: Duration,
) -> Vec<String> {
    if item_name.trim().is_empty() {
        return Vec::new();
    }
    match tokio::time::timeout(timeout, suggester.suggest(item_name)).await {
        Ok(Ok(tags)) => normalize_tags(tags),
        Ok(Err(err)) => {
            warn!("tag suggestion failed, continuing without tags: {err}");
            Vec::new()
        }
        Err(_) => {
            warn!(
                "tag suggestion timed out after {}ms, continuing without tags",
                timeout.as_millis()
            );
            Vec::new()
        }
    }
}
