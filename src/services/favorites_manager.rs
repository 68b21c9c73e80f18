// FavoritesManager Service
// Saved badge snapshots, newest first

use std::sync::Arc;

use chrono::Utc;

use crate::models::{BadgeConfig, Favorite, DEFAULT_LABEL, DEFAULT_MESSAGE, MAX_FAVORITES};
use crate::services::KeyValueStore;

pub const FAVORITES_KEY: &str = "shieldy-favorites";

#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    #[error("Generate a badge first")]
    NoBadge,

    #[error("Badge already in favorites")]
    Duplicate,

    #[error("No favorites to clear")]
    Empty,

    #[error("Clearing favorites requires confirmation")]
    NotConfirmed,

    #[error("Failed to store favorites: {0}")]
    Storage(String),
}

/// Display name for a saved badge
pub fn favorite_name(config: &BadgeConfig) -> String {
    match config {
        BadgeConfig::Static(badge) => {
            let label = if badge.label.is_empty() { DEFAULT_LABEL } else { &badge.label };
            let message = if badge.message.is_empty() { DEFAULT_MESSAGE } else { &badge.message };
            format!("{label}-{message}")
        }
        BadgeConfig::Dynamic(badge) if badge.service_key.is_empty() => "dynamic".to_string(),
        BadgeConfig::Dynamic(badge) => badge
            .service_key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect(),
    }
}

pub struct FavoritesManager {
    store: Arc<dyn KeyValueStore>,
    favorites: Vec<Favorite>,
}

impl FavoritesManager {
    /// Read the saved list once; missing or unreadable data starts empty
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let favorites = match store.get(FAVORITES_KEY) {
            Ok(Some(content)) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable favorites: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to load favorites: {e}");
                Vec::new()
            }
        };

        Self { store, favorites }
    }

    pub fn list(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn get(&self, id: i64) -> Option<&Favorite> {
        self.favorites.iter().find(|favorite| favorite.id == id)
    }

    pub fn save(&mut self, config: BadgeConfig, url: &str) -> Result<Favorite, FavoriteError> {
        if url.is_empty() {
            return Err(FavoriteError::NoBadge);
        }
        if self.favorites.iter().any(|favorite| favorite.url == url) {
            return Err(FavoriteError::Duplicate);
        }

        let created_at = Utc::now();
        let mut id = created_at.timestamp_millis();
        while self.favorites.iter().any(|favorite| favorite.id == id) {
            id += 1;
        }

        let favorite = Favorite {
            id,
            name: favorite_name(&config),
            mode: config.mode(),
            url: url.to_string(),
            config,
            created_at,
        };

        let mut updated = Vec::with_capacity(self.favorites.len() + 1);
        updated.push(favorite.clone());
        updated.extend(self.favorites.iter().cloned());
        updated.truncate(MAX_FAVORITES);

        self.commit(updated)?;
        log::info!("Saved favorite '{}'", favorite.name);
        Ok(favorite)
    }

    /// Returns false when no favorite has this id
    pub fn delete(&mut self, id: i64) -> Result<bool, FavoriteError> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let updated = self
            .favorites
            .iter()
            .filter(|favorite| favorite.id != id)
            .cloned()
            .collect();
        self.commit(updated)?;
        Ok(true)
    }

    /// Remove every favorite; returns how many were removed
    pub fn clear(&mut self, confirmed: bool) -> Result<usize, FavoriteError> {
        if self.favorites.is_empty() {
            return Err(FavoriteError::Empty);
        }
        if !confirmed {
            return Err(FavoriteError::NotConfirmed);
        }

        let removed = self.favorites.len();
        self.commit(Vec::new())?;
        log::info!("Cleared {removed} favorites");
        Ok(removed)
    }

    fn commit(&mut self, favorites: Vec<Favorite>) -> Result<(), FavoriteError> {
        let content = serde_json::to_string(&favorites)
            .map_err(|e| FavoriteError::Storage(e.to_string()))?;
        self.store
            .set(FAVORITES_KEY, &content)
            .map_err(FavoriteError::Storage)?;
        self.favorites = favorites;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DynamicBadge, StaticBadge};
    use crate::services::{FileStore, MemoryStore};

    fn static_config(label: &str) -> BadgeConfig {
        BadgeConfig::Static(StaticBadge {
            label: label.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_names() {
        assert_eq!(favorite_name(&static_config("")), "label-message");
        assert_eq!(favorite_name(&static_config("build")), "build-message");

        let dynamic = BadgeConfig::Dynamic(DynamicBadge {
            service_key: "github/languages/top".to_string(),
            ..Default::default()
        });
        assert_eq!(favorite_name(&dynamic), "github-languages-top");
        assert_eq!(
            favorite_name(&BadgeConfig::Dynamic(DynamicBadge::default())),
            "dynamic"
        );
    }

    #[test]
    fn test_save_rejects_duplicates_and_missing_url() {
        let mut manager = FavoritesManager::load(Arc::new(MemoryStore::new()));
        assert!(matches!(
            manager.save(static_config("a"), ""),
            Err(FavoriteError::NoBadge)
        ));

        manager.save(static_config("a"), "https://x/a").unwrap();
        assert!(matches!(
            manager.save(static_config("b"), "https://x/a"),
            Err(FavoriteError::Duplicate)
        ));
        assert_eq!(manager.list().len(), 1);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut manager = FavoritesManager::load(Arc::new(MemoryStore::new()));
        for i in 0..21 {
            manager
                .save(static_config(&i.to_string()), &format!("https://x/{i}"))
                .unwrap();
        }

        let list = manager.list();
        assert_eq!(list.len(), MAX_FAVORITES);
        assert_eq!(list[0].url, "https://x/20");
        assert!(list.iter().all(|favorite| favorite.url != "https://x/0"));

        let mut ids: Vec<i64> = list.iter().map(|favorite| favorite.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MAX_FAVORITES);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut manager = FavoritesManager::load(Arc::new(MemoryStore::new()));
        assert!(matches!(manager.clear(true), Err(FavoriteError::Empty)));

        let saved = manager.save(static_config("a"), "https://x/a").unwrap();
        manager.save(static_config("b"), "https://x/b").unwrap();

        assert!(!manager.delete(-1).unwrap());
        assert!(manager.delete(saved.id).unwrap());
        assert_eq!(manager.list().len(), 1);

        assert!(matches!(manager.clear(false), Err(FavoriteError::NotConfirmed)));
        assert_eq!(manager.clear(true).unwrap(), 1);
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path().to_path_buf()));
        let saved = {
            let mut manager = FavoritesManager::load(store);
            manager.save(static_config("kept"), "https://x/kept").unwrap()
        };

        let reopened = FavoritesManager::load(Arc::new(FileStore::new(dir.path().to_path_buf())));
        assert_eq!(reopened.list(), &[saved]);
    }

    #[test]
    fn test_corrupt_list_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(FAVORITES_KEY, "[{\"broken\"").unwrap();
        let manager = FavoritesManager::load(store);
        assert!(manager.list().is_empty());
    }
}
