// Template Model
// One-click presets for both badge modes

use std::collections::BTreeMap;

use serde::Serialize;

/// Preset for the static field set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticTemplate {
    pub id: String,
    pub label: String,
    pub message: String,
    pub message_color: String,
    pub style: String,
}

/// Preset for the dynamic field set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicTemplate {
    pub id: String,
    pub name: String,
    pub service_key: String,
    pub params: BTreeMap<String, String>,
}

/// A template of either kind, looked up by id
#[derive(Debug, Clone, Copy)]
pub enum Template<'a> {
    Static(&'a StaticTemplate),
    Dynamic(&'a DynamicTemplate),
}
