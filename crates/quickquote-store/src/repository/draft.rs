//! # Draft Repository
//!
//! The single saved quote form under [`DRAFT_KEY`]. Validation of the
//! restored fields happens in `QuoteInputs::apply_draft`; this layer only
//! rejects payloads that are not JSON objects.

use serde_json::Value;
use tracing::{info, warn};

use quickquote_core::Draft;

use crate::error::DbResult;
use crate::repository::storage::{StorageRepository, DRAFT_KEY};

/// Repository for the saved draft.
#[derive(Debug, Clone)]
pub struct DraftRepository {
    storage: StorageRepository,
}

impl DraftRepository {
    pub fn new(storage: StorageRepository) -> Self {
        DraftRepository { storage }
    }

    /// Replaces the saved draft.
    pub async fn save(&self, draft: &Draft) -> DbResult<()> {
        info!("Saving draft");
        self.storage.put_json(DRAFT_KEY, draft).await
    }

    /// The saved draft. A payload that is not a JSON object reads as
    /// `None` and is logged.
    pub async fn load(&self) -> DbResult<Option<Draft>> {
        let Some(raw) = self.storage.get(DRAFT_KEY).await? else {
            return Ok(None);
        };

        let parsed = serde_json::from_str::<Value>(&raw)
            .ok()
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value::<Draft>(value).ok());

        if parsed.is_none() {
            warn!(key = DRAFT_KEY, "Discarding unreadable draft");
        }
        Ok(parsed)
    }

    /// Deletes the saved draft. Returns whether one existed.
    pub async fn clear(&self) -> DbResult<bool> {
        info!("Clearing draft");
        self.storage.remove(DRAFT_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Utc;
    use quickquote_core::{QuoteInputs, RateTable};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let db = setup().await;
        let repo = db.drafts();
        let rates = RateTable::builtin().unwrap();

        let mut inputs = QuoteInputs::with_defaults(&rates);
        inputs.location = "Ghana".to_string();
        inputs.tax_pct = 5.0;
        let draft = inputs.to_draft(Utc::now());

        repo.save(&draft).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, draft);

        let mut restored = QuoteInputs::with_defaults(&rates);
        restored.apply_draft(&loaded, &rates);
        assert_eq!(restored, inputs);

        assert!(repo.clear().await.unwrap());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_draft() {
        let db = setup().await;
        assert!(db.drafts().load().await.unwrap().is_none());
        assert!(!db.drafts().clear().await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_draft_is_none() {
        let db = setup().await;

        for payload in ["{ not json", "[1, 2]", "\"text\"", "null"] {
            db.storage().put(DRAFT_KEY, payload).await.unwrap();
            assert!(db.drafts().load().await.unwrap().is_none(), "{payload}");
        }
    }

    #[tokio::test]
    async fn test_partial_draft_loads() {
        let db = setup().await;
        db.storage()
            .put(DRAFT_KEY, r#"{ "quality": "High", "taxPct": "oops" }"#)
            .await
            .unwrap();

        let draft = db.drafts().load().await.unwrap().unwrap();
        assert_eq!(draft.quality.as_deref(), Some("High"));
        assert_eq!(draft.tax_pct, None);
    }
}
