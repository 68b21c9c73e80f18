// Badge Model
// Field sets for static and dynamic badges

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL: &str = "label";
pub const DEFAULT_MESSAGE: &str = "message";
pub const DEFAULT_LABEL_COLOR: &str = "555";
pub const DEFAULT_MESSAGE_COLOR: &str = "brightgreen";
pub const DEFAULT_STYLE: &str = "flat";

/// Which field set is currently driving the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeMode {
    #[default]
    Static,
    Dynamic,
}

impl BadgeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeMode::Static => "static",
            BadgeMode::Dynamic => "dynamic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "static" => Some(BadgeMode::Static),
            "dynamic" => Some(BadgeMode::Dynamic),
            _ => None,
        }
    }
}

/// Static badge fields, kept as the raw values the user typed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticBadge {
    pub label: String,
    pub message: String,
    pub label_color: String,
    pub message_color: String,
    pub style: String,
    /// Named icon slug (empty for none)
    pub logo: String,
    pub logo_color: String,
    pub cache_enabled: bool,
    pub cache_seconds: String,
    /// Optional target the exported badge links to
    pub link: String,
}

/// Query options shared by every dynamic service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    pub style: String,
    pub logo: String,
    pub logo_color: String,
    /// Message color override, sent as `color`
    pub color: String,
    /// Label color override
    pub label_color: String,
}

/// Dynamic badge fields: a catalog service plus its parameter values
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DynamicBadge {
    pub service_key: String,
    pub params: BTreeMap<String, String>,
    #[serde(flatten)]
    pub display: DisplayOptions,
}

/// A full badge request for one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BadgeConfig {
    Static(StaticBadge),
    Dynamic(DynamicBadge),
}

impl BadgeConfig {
    pub fn mode(&self) -> BadgeMode {
        match self {
            BadgeConfig::Static(_) => BadgeMode::Static,
            BadgeConfig::Dynamic(_) => BadgeMode::Dynamic,
        }
    }
}

/// Partial update of the static field set; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticPatch {
    pub label: Option<String>,
    pub message: Option<String>,
    pub label_color: Option<String>,
    pub message_color: Option<String>,
    pub style: Option<String>,
    pub logo: Option<String>,
    pub logo_color: Option<String>,
    pub cache_enabled: Option<bool>,
    pub cache_seconds: Option<String>,
    pub link: Option<String>,
}

impl StaticPatch {
    pub fn apply(self, target: &mut StaticBadge) {
        fn set(slot: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut target.label, self.label);
        set(&mut target.message, self.message);
        set(&mut target.label_color, self.label_color);
        set(&mut target.message_color, self.message_color);
        set(&mut target.style, self.style);
        set(&mut target.logo, self.logo);
        set(&mut target.logo_color, self.logo_color);
        set(&mut target.cache_seconds, self.cache_seconds);
        set(&mut target.link, self.link);
        if let Some(enabled) = self.cache_enabled {
            target.cache_enabled = enabled;
        }
    }
}

/// Partial update of the dynamic display options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayPatch {
    pub style: Option<String>,
    pub logo: Option<String>,
    pub logo_color: Option<String>,
    pub color: Option<String>,
    pub label_color: Option<String>,
}

impl DisplayPatch {
    pub fn apply(self, target: &mut DisplayOptions) {
        let fields = [
            (&mut target.style, self.style),
            (&mut target.logo, self.logo),
            (&mut target.logo_color, self.logo_color),
            (&mut target.color, self.color),
            (&mut target.label_color, self.label_color),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}
