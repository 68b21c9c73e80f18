// SettingsManager Service
// Handles backend settings persistence

use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::models::Settings;

/// Manages settings storage and retrieval
pub struct SettingsManager {
    settings_path: PathBuf,
    cache: RwLock<Option<Settings>>,
}

impl SettingsManager {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join("settings.json"),
            cache: RwLock::new(None),
        }
    }

    /// Load settings from disk, or return defaults if not found.
    /// Keys missing from the file are filled from defaults and written back.
    pub fn load(&self) -> Result<Settings, String> {
        if let Ok(cache) = self.cache.read() {
            if let Some(ref settings) = *cache {
                return Ok(settings.clone());
            }
        }

        let settings = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)
                .map_err(|e| format!("Failed to read settings: {e}"))?;

            let mut user_value: Value = serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse settings: {e}"))?;

            let defaults_value = serde_json::to_value(Settings::default())
                .map_err(|e| format!("Failed to build default settings: {e}"))?;

            let changed = merge_missing_settings(&mut user_value, &defaults_value);

            let settings: Settings = serde_json::from_value(user_value)
                .map_err(|e| format!("Failed to parse settings: {e}"))?;

            if changed {
                log::info!("Added missing keys to {:?}", self.settings_path);
                self.save_internal(&settings)?;
            }

            settings
        } else {
            let defaults = Settings::default();
            self.save_internal(&defaults)?;
            defaults
        };

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(settings.clone());
        }

        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), String> {
        self.save_internal(settings)?;

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(settings.clone());
        }

        Ok(())
    }

    fn save_internal(&self, settings: &Settings) -> Result<(), String> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {e}"))?;
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;

        std::fs::write(&self.settings_path, content)
            .map_err(|e| format!("Failed to write settings: {e}"))
    }
}

fn merge_missing_settings(target: &mut Value, defaults: &Value) -> bool {
    match (target, defaults) {
        (Value::Object(target_map), Value::Object(defaults_map)) => {
            let mut changed = false;
            for (key, default_value) in defaults_map {
                match target_map.get_mut(key) {
                    Some(target_value) => {
                        if merge_missing_settings(target_value, default_value) {
                            changed = true;
                        }
                    }
                    None => {
                        target_map.insert(key.clone(), default_value.clone());
                        changed = true;
                    }
                }
            }
            changed
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SettingsManager::new(dir.path().to_path_buf());

        let settings = manager.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_merges_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "backendPort": 9000, "badgeEndpoint": "https://badges.local" }"#,
        )
        .unwrap();

        let settings = SettingsManager::new(dir.path().to_path_buf()).load().unwrap();
        assert_eq!(settings.backend_port, 9000);
        assert_eq!(settings.badge_endpoint, "https://badges.local");
        assert_eq!(settings.log_level, "info");

        let written = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(written.contains("logRetentionDays"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SettingsManager::new(dir.path().to_path_buf());
        let settings = Settings {
            backend_token: "secret".to_string(),
            log_level: "debug".to_string(),
            ..Settings::default()
        };
        manager.save(&settings).unwrap();

        let reloaded = SettingsManager::new(dir.path().to_path_buf()).load().unwrap();
        assert_eq!(reloaded, settings);
        assert_eq!(reloaded.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "not json").unwrap();
        let err = SettingsManager::new(dir.path().to_path_buf()).load().unwrap_err();
        assert!(err.starts_with("Failed to parse settings"));
    }
}
