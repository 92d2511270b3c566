//! # Material Favorites Repository
//!
//! The user's material catalogue under [`FAVORITES_KEY`]. Until something
//! is saved, the built-in defaults are returned. An empty saved list stays
//! empty.

use tracing::{info, warn};

use quickquote_core::materials::{default_favorites, restore_favorites, StoredMaterial};
use quickquote_core::MaterialFavorite;

use crate::error::{DbError, DbResult};
use crate::repository::storage::{StorageRepository, FAVORITES_KEY};

/// Repository for material favorites.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    storage: StorageRepository,
}

impl FavoriteRepository {
    pub fn new(storage: StorageRepository) -> Self {
        FavoriteRepository { storage }
    }

    /// The catalogue; defaults when nothing (readable) is saved.
    pub async fn list(&self) -> DbResult<Vec<MaterialFavorite>> {
        let Some(raw) = self.storage.get(FAVORITES_KEY).await? else {
            return Ok(default_favorites());
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(items) => {
                let stored = items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value::<StoredMaterial>(item).ok())
                    .collect();
                Ok(restore_favorites(stored))
            }
            Err(err) => {
                warn!(key = FAVORITES_KEY, error = %err, "Stored favorites unreadable; using defaults");
                Ok(default_favorites())
            }
        }
    }

    /// Finds a favorite by id.
    pub async fn find(&self, id: &str) -> DbResult<Option<MaterialFavorite>> {
        Ok(self.list().await?.into_iter().find(|f| f.id == id))
    }

    /// Appends `favorite` and returns the updated catalogue.
    pub async fn add(&self, favorite: MaterialFavorite) -> DbResult<Vec<MaterialFavorite>> {
        let mut favorites = self.list().await?;
        info!(id = %favorite.id, name = %favorite.name, "Adding material favorite");
        favorites.push(favorite);
        self.replace_all(&favorites).await?;
        Ok(favorites)
    }

    /// Removes the favorite with `id`.
    ///
    /// ## Errors
    /// [`DbError::NotFound`] if no favorite has that id.
    pub async fn remove(&self, id: &str) -> DbResult<Vec<MaterialFavorite>> {
        let mut favorites = self.list().await?;
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            return Err(DbError::not_found("Favorite", id));
        }

        info!(id, "Removed material favorite");
        self.replace_all(&favorites).await?;
        Ok(favorites)
    }

    /// Replaces the whole catalogue.
    pub async fn replace_all(&self, favorites: &[MaterialFavorite]) -> DbResult<()> {
        self.storage.put_json(FAVORITES_KEY, favorites).await
    }
}
