//! HTTP tag-suggestion provider
//!
//! Implements [`TagSuggester`] against a generative-text API: the item name
//! is wrapped in a prompt asking for a JSON array of short lowercase tags,
//! and the model's JSON-mode reply is validated and normalized. Callers go
//! through `suggest_or_empty` in core, so every failure here ultimately
//! degrades to "no suggestions" rather than blocking item creation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use packrat_config::HttpSuggestConfig;
use packrat_core::{SuggestError, TagSuggester};

/// Most tags a single suggestion call will return.
const MAX_TAGS: usize = 5;

/// [`TagSuggester`] backed by a generateContent-style HTTP endpoint.
pub struct HttpTagSuggester {
    client: reqwest::Client,
    config: HttpSuggestConfig,
}

impl HttpTagSuggester {
    /// Create a suggester over the given endpoint settings.
    ///
    /// A missing API key is not an error here; each `suggest` call fails
    /// fast with [`SuggestError::MissingCredential`] instead, which the
    /// policy wrapper maps to an empty suggestion list.
    #[must_use]
    pub fn new(client: reqwest::Client, config: HttpSuggestConfig) -> Self {
        Self { client, config }
    }

    fn build_prompt(item_name: &str) -> String {
        format!(
            "Generate 3-5 relevant, single-word, lowercase, searchable tags \
             for the following inventory item: '{item_name}'. Return the \
             response as a JSON array of strings. For example, for 'iPhone 15 \
             Pro Max', you might return: [\"electronics\", \"apple\", \
             \"smartphone\", \"mobile\", \"gadget\"]"
        )
    }
}

#[async_trait]
impl TagSuggester for HttpTagSuggester {
    async fn suggest(&self, item_name: &str) -> Result<Vec<String>, SuggestError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SuggestError::MissingCredential("no API key configured".to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            urlencoding::encode(api_key)
        );

        let request = serde_json::json!({
            "contents": [{
                "parts": [{ "text": Self::build_prompt(item_name) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            }
        });

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SuggestError::Timeout {
                        duration_ms: timeout.as_millis() as u64,
                    }
                } else {
                    SuggestError::Network(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SuggestError::Network(format!(
                "suggestion endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| SuggestError::MalformedResponse(err.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                SuggestError::MalformedResponse("response has no candidates".to_string())
            })?;

        // The model replies in JSON mode; anything but an array of strings
        // is malformed.
        let tags: Vec<String> = serde_json::from_str(text.trim())
            .map_err(|err| SuggestError::MalformedResponse(err.to_string()))?;

        let tags: Vec<String> = tags
            .into_iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .take(MAX_TAGS)
            .collect();
        debug!(count = tags.len(), "received tag suggestions");
        Ok(tags)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
