//! # Quote History Repository
//!
//! The newest saved quotes under [`HISTORY_KEY`].
//!
//! ```text
//! record(new) ──► [new, q4, q3, q2, q1]   (q0 dropped: cap is 5)
//! ```
//!
//! The stored array is kept as raw JSON. Entries this build cannot read are
//! hidden from [`HistoryRepository::list`] but written back untouched, and
//! they still count toward the cap.

use serde_json::Value;
use tracing::{info, warn};

use quickquote_core::materials::new_id;
use quickquote_core::{QuoteHistory, QuoteRecord, MAX_HISTORY_ENTRIES};

use crate::error::{DbError, DbResult};
use crate::repository::storage::{StorageRepository, HISTORY_KEY};

/// Repository for saved quotes.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    storage: StorageRepository,
}

impl HistoryRepository {
    pub fn new(storage: StorageRepository) -> Self {
        HistoryRepository { storage }
    }

    /// Saved quotes, newest first.
    ///
    /// Unreadable entries are skipped with a warning. Entries saved without
    /// an id are given one and written back, so ids stay stable.
    pub async fn list(&self) -> DbResult<QuoteHistory> {
        let mut items = self.load_items().await?;
        if backfill_ids(&mut items) {
            self.storage.put_json(HISTORY_KEY, &items).await?;
        }
        Ok(readable(&items))
    }

    /// Adds `record` as the newest entry and returns the updated history.
    pub async fn record(&self, record: QuoteRecord) -> DbResult<QuoteHistory> {
        let mut items = self.load_items().await?;
        backfill_ids(&mut items);

        info!(id = %record.id, project = %record.project_type, "Recording quote");
        items.insert(0, serde_json::to_value(&record)?);
        items.truncate(MAX_HISTORY_ENTRIES);

        self.storage.put_json(HISTORY_KEY, &items).await?;
        Ok(readable(&items))
    }

    /// Finds a saved quote by id.
    pub async fn find(&self, id: &str) -> DbResult<Option<QuoteRecord>> {
        Ok(self.list().await?.find(id).cloned())
    }

    /// Like [`find`](Self::find), but a missing id is an error.
    pub async fn get(&self, id: &str) -> DbResult<QuoteRecord> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("Quote", id))
    }

    /// Deletes every saved quote. Returns whether anything was stored.
    pub async fn clear(&self) -> DbResult<bool> {
        info!("Clearing quote history");
        self.storage.remove(HISTORY_KEY).await
    }

    /// The stored array as raw values. Anything that is not an array reads
    /// as empty.
    async fn load_items(&self) -> DbResult<Vec<Value>> {
        let Some(raw) = self.storage.get(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => Ok(items),
            _ => {
                warn!(key = HISTORY_KEY, "Stored history is not a list; ignoring it");
                Ok(Vec::new())
            }
        }
    }
}

/// Gives every readable entry without an id a fresh one. Returns whether
/// anything changed.
fn backfill_ids(items: &mut [Value]) -> bool {
    let mut changed = false;
    for item in items.iter_mut() {
        let needs_id = serde_json::from_value::<QuoteRecord>(item.clone())
            .map(|record| record.id.is_empty())
            .unwrap_or(false);
        if let (true, Some(fields)) = (needs_id, item.as_object_mut()) {
            fields.insert("id".to_string(), Value::String(new_id()));
            changed = true;
        }
    }
    changed
}

fn readable(items: &[Value]) -> QuoteHistory {
    let entries: Vec<QuoteRecord> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    if entries.len() < items.len() {
        warn!(
            skipped = items.len() - entries.len(),
            "Skipped unreadable history entries"
        );
    }
    QuoteHistory::from_entries(entries)
}
