// Badge Session
// The current badge request: both field sets, the active mode and the last URL

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{
    BadgeConfig, BadgeMode, CustomLogo, CustomLogoInfo, DisplayPatch, DynamicBadge,
    DynamicTemplate, Favorite, ServiceDefinition, StaticBadge, StaticPatch, StaticTemplate,
    Template, DEFAULT_LABEL_COLOR, DEFAULT_MESSAGE_COLOR, DEFAULT_STYLE,
};
use crate::services::{
    build_dynamic_url, build_static_url, favorite_name, BadgeEndpoint, BuildError, KeyValueStore,
    ServiceCatalog,
};

/// Prefix of the per-field keys in the key-value store
pub const FIELD_PREFIX: &str = "shieldy_";

fn field_key(id: &str) -> String {
    format!("{FIELD_PREFIX}{id}")
}

/// Read-only view handed to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub mode: BadgeMode,
    #[serde(rename = "static")]
    pub static_badge: StaticBadge,
    #[serde(rename = "dynamic")]
    pub dynamic_badge: DynamicBadge,
    pub custom_logo: Option<CustomLogoInfo>,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BadgeSession {
    mode: BadgeMode,
    static_badge: StaticBadge,
    dynamic_badge: DynamicBadge,
    custom_logo: Option<CustomLogo>,
    current_url: Option<String>,
}

impl Default for BadgeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BadgeSession {
    pub fn new() -> Self {
        let mut dynamic_badge = DynamicBadge::default();
        dynamic_badge.display.style = DEFAULT_STYLE.to_string();

        Self {
            mode: BadgeMode::Static,
            static_badge: StaticBadge {
                label_color: DEFAULT_LABEL_COLOR.to_string(),
                message_color: DEFAULT_MESSAGE_COLOR.to_string(),
                style: DEFAULT_STYLE.to_string(),
                ..Default::default()
            },
            dynamic_badge,
            custom_logo: None,
            current_url: None,
        }
    }

    pub fn mode(&self) -> BadgeMode {
        self.mode
    }

    pub fn static_badge(&self) -> &StaticBadge {
        &self.static_badge
    }

    pub fn dynamic_badge(&self) -> &DynamicBadge {
        &self.dynamic_badge
    }

    pub fn custom_logo(&self) -> Option<&CustomLogo> {
        self.custom_logo.as_ref()
    }

    /// Last successfully built URL
    pub fn url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Export link target; one field shared by both modes
    pub fn link(&self) -> &str {
        self.static_badge.link.trim()
    }

    /// Change the active mode; neither field set is cleared
    pub fn switch_mode(&mut self, mode: BadgeMode) {
        self.mode = mode;
    }

    pub fn update_static(&mut self, patch: StaticPatch) {
        patch.apply(&mut self.static_badge);
    }

    pub fn update_dynamic(&mut self, patch: DisplayPatch) {
        patch.apply(&mut self.dynamic_badge.display);
    }

    /// Merge parameter values into the current form
    pub fn set_params(&mut self, values: BTreeMap<String, String>) {
        self.dynamic_badge.params.extend(values);
    }

    /// Select a service and reset the parameter form to its fields (all empty).
    /// Unknown keys are kept as typed with an empty form.
    pub fn select_service<'c>(
        &mut self,
        key: &str,
        catalog: &'c ServiceCatalog,
    ) -> Option<&'c ServiceDefinition> {
        let key = key.trim();
        self.dynamic_badge.service_key = key.to_string();
        self.dynamic_badge.params.clear();

        let service = catalog.get(key)?;
        for param in &service.params {
            self.dynamic_badge.params.insert(param.name.clone(), String::new());
        }
        Some(service)
    }

    /// Switch to static mode and copy the preset's text, color and style
    pub fn apply_static_template(&mut self, template: &StaticTemplate) {
        self.mode = BadgeMode::Static;
        self.static_badge.label = template.label.clone();
        self.static_badge.message = template.message.clone();
        self.static_badge.message_color = template.message_color.clone();
        self.static_badge.style = template.style.clone();
    }

    /// Switch to dynamic mode, select the preset's service, then fill its values
    pub fn apply_dynamic_template(&mut self, template: &DynamicTemplate, catalog: &ServiceCatalog) {
        self.mode = BadgeMode::Dynamic;
        self.select_service(&template.service_key, catalog);
        self.set_params(template.params.clone());
    }

    pub fn apply_template(&mut self, template: Template<'_>, catalog: &ServiceCatalog) {
        match template {
            Template::Static(template) => self.apply_static_template(template),
            Template::Dynamic(template) => self.apply_dynamic_template(template, catalog),
        }
    }

    /// Restore a saved badge into its mode's field set
    pub fn load_favorite(&mut self, favorite: &Favorite, catalog: &ServiceCatalog) {
        match &favorite.config {
            BadgeConfig::Static(badge) => {
                self.mode = BadgeMode::Static;
                self.static_badge = badge.clone();
            }
            BadgeConfig::Dynamic(badge) => {
                self.mode = BadgeMode::Dynamic;
                self.select_service(&badge.service_key, catalog);
                self.set_params(badge.params.clone());
                self.dynamic_badge.display = badge.display.clone();
            }
        }
    }

    /// Use an uploaded logo; the named logo of the active mode is cleared
    pub fn set_custom_logo(&mut self, logo: CustomLogo) {
        match self.mode {
            BadgeMode::Static => self.static_badge.logo.clear(),
            BadgeMode::Dynamic => self.dynamic_badge.display.logo.clear(),
        }
        self.custom_logo = Some(logo);
    }

    /// Returns whether a logo was removed
    pub fn clear_custom_logo(&mut self) -> bool {
        self.custom_logo.take().is_some()
    }

    /// Rebuild the URL for the active mode; a refusal clears the current URL
    pub fn regenerate(
        &mut self,
        endpoint: &BadgeEndpoint,
        catalog: &ServiceCatalog,
    ) -> Result<String, BuildError> {
        let custom_logo = self.custom_logo.as_ref().map(|logo| logo.data_url.as_str());
        let result = match self.mode {
            BadgeMode::Static => Ok(build_static_url(endpoint, &self.static_badge, custom_logo)),
            BadgeMode::Dynamic => {
                build_dynamic_url(endpoint, catalog, &self.dynamic_badge, custom_logo)
            }
        };

        self.current_url = result.as_ref().ok().cloned();
        result
    }

    /// Field set of the active mode
    pub fn snapshot(&self) -> BadgeConfig {
        match self.mode {
            BadgeMode::Static => BadgeConfig::Static(self.static_badge.clone()),
            BadgeMode::Dynamic => BadgeConfig::Dynamic(self.dynamic_badge.clone()),
        }
    }

    pub fn favorite_name(&self) -> String {
        favorite_name(&self.snapshot())
    }

    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            static_badge: self.static_badge.clone(),
            dynamic_badge: self.dynamic_badge.clone(),
            custom_logo: self.custom_logo.as_ref().map(CustomLogo::info),
            url: self.current_url.clone(),
        }
    }

    fn text_fields(&self) -> Vec<(&'static str, &str)> {
        let display = &self.dynamic_badge.display;
        vec![
            ("badge-mode", self.mode.as_str()),
            ("label-text", self.static_badge.label.as_str()),
            ("message-text", self.static_badge.message.as_str()),
            ("link-url", self.static_badge.link.as_str()),
            ("label-color-text", self.static_badge.label_color.as_str()),
            ("message-color-text", self.static_badge.message_color.as_str()),
            ("badge-style", self.static_badge.style.as_str()),
            ("logo-option", self.static_badge.logo.as_str()),
            ("logo-color", self.static_badge.logo_color.as_str()),
            ("cache-value", self.static_badge.cache_seconds.as_str()),
            ("dynamic-service", self.dynamic_badge.service_key.as_str()),
            ("dynamic-style", display.style.as_str()),
            ("dynamic-logo", display.logo.as_str()),
            ("dynamic-logo-color", display.logo_color.as_str()),
            ("dynamic-color", display.color.as_str()),
            ("dynamic-label-color", display.label_color.as_str()),
        ]
    }

    fn text_field_mut(&mut self, id: &str) -> Option<&mut String> {
        let display = &mut self.dynamic_badge.display;
        let slot = match id {
            "label-text" => &mut self.static_badge.label,
            "message-text" => &mut self.static_badge.message,
            "link-url" => &mut self.static_badge.link,
            "label-color-text" => &mut self.static_badge.label_color,
            "message-color-text" => &mut self.static_badge.message_color,
            "badge-style" => &mut self.static_badge.style,
            "logo-option" => &mut self.static_badge.logo,
            "logo-color" => &mut self.static_badge.logo_color,
            "cache-value" => &mut self.static_badge.cache_seconds,
            "dynamic-style" => &mut display.style,
            "dynamic-logo" => &mut display.logo,
            "dynamic-logo-color" => &mut display.logo_color,
            "dynamic-color" => &mut display.color,
            "dynamic-label-color" => &mut display.label_color,
            _ => return None,
        };
        Some(slot)
    }

    /// Save every form field under its own key
    pub fn persist_fields(&self, store: &dyn KeyValueStore) -> Result<(), String> {
        for (id, value) in self.text_fields() {
            store.set(&field_key(id), value)?;
        }
        store.set(
            &field_key("cache-seconds"),
            if self.static_badge.cache_enabled { "true" } else { "false" },
        )?;
        for (name, value) in &self.dynamic_badge.params {
            store.set(&field_key(&format!("param-{name}")), value)?;
        }
        Ok(())
    }

    /// Load previously saved form fields; keys that were never saved keep their defaults
    pub fn restore_fields(
        &mut self,
        store: &dyn KeyValueStore,
        catalog: &ServiceCatalog,
    ) -> Result<(), String> {
        let ids: Vec<&'static str> = self.text_fields().into_iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(value) = store.get(&field_key(id))? else {
                continue;
            };
            match id {
                "badge-mode" => match BadgeMode::parse(&value) {
                    Some(mode) => self.mode = mode,
                    None => log::warn!("Ignoring stored badge mode '{value}'"),
                },
                "dynamic-service" => {
                    self.select_service(&value, catalog);
                }
                _ => {
                    if let Some(slot) = self.text_field_mut(id) {
                        *slot = value;
                    }
                }
            }
        }

        if let Some(value) = store.get(&field_key("cache-seconds"))? {
            self.static_badge.cache_enabled = value == "true";
        }

        let names: Vec<String> = self.dynamic_badge.params.keys().cloned().collect();
        for name in names {
            if let Some(value) = store.get(&field_key(&format!("param-{name}")))? {
                self.dynamic_badge.params.insert(name, value);
            }
        }

        Ok(())
    }
}
