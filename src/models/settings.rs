// Settings Model
// Backend configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_BADGE_ENDPOINT: &str = "https://img.shields.io";

fn default_log_retention_days() -> u32 {
    14
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend_host() -> String {
    "127.0.0.1".to_string()
}

fn default_backend_port() -> u16 {
    8010
}

fn default_rate_limit_per_minute() -> u32 {
    600
}

fn default_badge_endpoint() -> String {
    DEFAULT_BADGE_ENDPOINT.to_string()
}

/// Backend settings stored in `settings.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    // Local host server (HTTP/WS)
    #[serde(default)]
    pub backend_remote_enabled: bool,
    #[serde(default)]
    pub backend_ui_enabled: bool,
    #[serde(default = "default_backend_host")]
    pub backend_host: String,
    #[serde(default = "default_backend_port")]
    pub backend_port: u16,
    #[serde(default)]
    pub backend_token: String,
    #[serde(default = "default_rate_limit_per_minute")]
    pub rate_limit_per_minute: u32,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,

    // Rendering service root, e.g. a self-hosted shields instance
    #[serde(default = "default_badge_endpoint")]
    pub badge_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_remote_enabled: false,
            backend_ui_enabled: false,
            backend_host: default_backend_host(),
            backend_port: default_backend_port(),
            backend_token: String::new(),
            rate_limit_per_minute: default_rate_limit_per_minute(),
            log_level: default_log_level(),
            log_retention_days: default_log_retention_days(),
            badge_endpoint: default_badge_endpoint(),
        }
    }
}

impl Settings {
    /// Parsed `log_level`, falling back to info
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.trim().parse().unwrap_or(log::LevelFilter::Info)
    }
}
