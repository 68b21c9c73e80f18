use std::sync::Arc;

use crate::models::ThemeMode;
use crate::services::KeyValueStore;

pub const THEME_KEY: &str = "shieldy-theme";

/// Light/dark preference stored alongside the other client keys
#[derive(Clone)]
pub struct ThemeManager {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored preference; anything missing or unrecognized reads as light
    pub fn get(&self) -> ThemeMode {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => ThemeMode::parse(&value).unwrap_or_else(|| {
                log::warn!("Unknown theme '{value}', using light");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                log::warn!("Failed to read theme preference: {e}");
                ThemeMode::default()
            }
        }
    }

    pub fn set(&self, mode: ThemeMode) -> Result<ThemeMode, String> {
        self.store.set(THEME_KEY, mode.as_str())?;
        log::debug!("Theme set to {}", mode.as_str());
        Ok(mode)
    }

    pub fn toggle(&self) -> Result<ThemeMode, String> {
        self.set(self.get().toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let manager = ThemeManager::new(Arc::new(MemoryStore::new()));
        assert_eq!(manager.get(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let store = Arc::new(MemoryStore::new());
        let manager = ThemeManager::new(store.clone());

        assert_eq!(manager.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(manager.toggle().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn test_garbage_reads_as_light() {
        let store = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeManager::new(store).get(), ThemeMode::Light);
    }
}
