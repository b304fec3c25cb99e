//! Spreadsheet-backed storage for Packrat
//!
//! Reads the collection from a published visualization-API JSON feed and
//! writes it back through a web-app endpoint, one flattened row per item.
//!
//! The read feed wraps its JSON in a JSONP-style function call, reports
//! errors in-band via a `status`/`errors` pair, and identifies columns by
//! header label rather than position, so the reader resolves `box_id`,
//! `item_id`, `item_name`, and `item_tags` indices from the labels and
//! tolerates column reordering. The write endpoint accepts the full
//! flattened collection as a JSON 2D array and answers with a
//! `{status, message}` document; anything but `"success"` is a rejected
//! write.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use packrat_config::SheetStoreConfig;
use packrat_core::{
    flatten_boxes, group_records, InventoryBox, InventoryRecord, InventoryStore, StoreError,
    StoreResult,
};

/// Header labels the feed must provide, matched case-insensitively.
const REQUIRED_HEADERS: [&str; 4] = ["box_id", "item_id", "item_name", "item_tags"];

/// [`InventoryStore`] over a published spreadsheet.
pub struct SheetStore {
    client: reqwest::Client,
    config: SheetStoreConfig,
}

impl SheetStore {
    /// Create a store over the given endpoints.
    #[must_use]
    pub fn new(client: reqwest::Client, config: SheetStoreConfig) -> Self {
        Self { client, config }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    fn map_request_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout {
                duration_ms: self.timeout().as_millis() as u64,
            }
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl InventoryStore for SheetStore {
    async fn load_all(&self) -> StoreResult<Vec<InventoryBox>> {
        let read_url = self
            .config
            .read_url
            .as_deref()
            .ok_or_else(|| StoreError::NotConfigured("sheet read URL not set".to_string()))?;

        let response = self
            .client
            .get(read_url)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|err| self.map_request_error(err))?;

        if !response.status().is_success() {
            return Err(StoreError::Network(format!(
                "sheet read failed with HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.map_request_error(err))?;
        let records = parse_feed(&body)?;
        debug!(rows = records.len(), "parsed sheet feed");
        Ok(group_records(records))
    }

    async fn save_all(&self, boxes: &[InventoryBox]) -> StoreResult<()> {
        let write_url = self
            .config
            .write_url
            .as_deref()
            .ok_or_else(|| StoreError::NotConfigured("sheet write URL not set".to_string()))?;

        // One row per item, placeholder row per empty box.
        let rows: Vec<[String; 4]> = flatten_boxes(boxes)
            .into_iter()
            .map(|r| [r.box_id, r.item_id, r.item_name, r.item_tags])
            .collect();

        let response = self
            .client
            .post(write_url)
            .timeout(self.timeout())
            .json(&rows)
            .send()
            .await
            .map_err(|err| self.map_request_error(err))?;

        if !response.status().is_success() {
            return Err(StoreError::Network(format!(
                "sheet write failed with HTTP {}",
                response.status()
            )));
        }

        let ack: WriteAck = response
            .json()
            .await
            .map_err(|err| StoreError::Parse(err.to_string()))?;
        if ack.status != "success" {
            return Err(StoreError::Rejected(
                ack.message
                    .unwrap_or_else(|| "unknown error from write endpoint".to_string()),
            ));
        }
        debug!(rows = rows.len(), "sheet write acknowledged");
        Ok(())
    }
}

/// Parse the visualization-API feed body into flattened records.
///
/// Handles the JSONP wrapper (payload inside the outermost parentheses),
/// in-band error reporting, and label-based column resolution. Cell values
/// may be strings or numbers; missing cells read as empty.
fn parse_feed(body: &str) -> StoreResult<Vec<InventoryRecord>> {
    let json = strip_jsonp(body);
    let feed: GvizResponse =
        serde_json::from_str(json).map_err(|err| StoreError::Parse(err.to_string()))?;

    if feed.status.as_deref() == Some("error") {
        let detail: Vec<String> = feed.errors.into_iter().map(|e| e.detailed_message).collect();
        return Err(StoreError::Parse(format!(
            "feed reported error: {}",
            detail.join("; ")
        )));
    }

    let table = feed
        .table
        .ok_or_else(|| StoreError::Parse("feed has no table".to_string()))?;

    let labels: Vec<String> = table
        .cols
        .iter()
        .map(|col| col.label.trim().to_lowercase())
        .collect();
    let mut indices = [0usize; 4];
    for (slot, header) in REQUIRED_HEADERS.iter().enumerate() {
        indices[slot] = labels
            .iter()
            .position(|label| label == header)
            .ok_or_else(|| {
                StoreError::Parse(format!(
                    "feed is missing required header '{header}'; expected headers: {}",
                    REQUIRED_HEADERS.join(", ")
                ))
            })?;
    }
    let [box_idx, id_idx, name_idx, tags_idx] = indices;

    Ok(table
        .rows
        .into_iter()
        .map(|row| InventoryRecord {
            box_id: row.cell_string(box_idx),
            item_id: row.cell_string(id_idx),
            item_name: row.cell_string(name_idx),
            item_tags: row.cell_string(tags_idx),
        })
        .collect())
}

/// Extract the JSON payload from a JSONP-style wrapper. Bodies without a
/// wrapper pass through unchanged.
fn strip_jsonp(body: &str) -> &str {
    match (body.find('('), body.rfind(')')) {
        (Some(open), Some(close)) if open < close => &body[open + 1..close],
        _ => body,
    }
}

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<GvizError>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    detailed_message: String,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizCol>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizCol {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: serde_json::Value,
}

impl GvizRow {
    /// Cell value at the given column as a string; absent or null reads as
    /// empty. Spreadsheets hand back numbers for numeric-looking ids.
    fn cell_string(&self, idx: usize) -> String {
        match self.c.get(idx).and_then(Option::as_ref) {
            Some(cell) => match &cell.v {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => String::new(),
            },
            None => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WriteAck {
    status: String,
    #[serde(default)]
    message: Option<String>,
}
